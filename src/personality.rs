use log::trace;
use rand::Rng;
use std::f32::consts::TAU;
use swarm_common::{Creature, Personality, World};

/// Samples a value uniformly from `[low, low + span)` using a single `[0, 1)` draw.
#[inline(always)]
fn sample<R: Rng + ?Sized>(rng: &mut R, low: f32, span: f32) -> f32 {
    low + rng.random::<f32>() * span
}

/// Rolls a fresh personality.
pub fn roll_personality<R: Rng + ?Sized>(rng: &mut R) -> Personality {
    Personality {
        jitteriness: sample(rng, 0.5, 0.5),
        speed_variation: sample(rng, 0.8, 0.4),
        direction_persistence: sample(rng, 0.7, 0.3),
        wander_angle: sample(rng, 0.0, TAU),
        wander_timer: 0,
    }
}

/// Assigns a personality to the creature if it has none. Returns the (possibly
/// pre-existing) personality; an existing one is never re-rolled.
pub fn ensure_personality<'a, R: Rng + ?Sized>(
    creature: &'a mut Creature,
    rng: &mut R,
) -> &'a mut Personality {
    let id = creature.id;
    creature.personality.get_or_insert_with(|| {
        let p = roll_personality(rng);
        trace!("Assigned personality to creature {:?}: {:?}", id, p);
        p
    })
}

/// Runs [`ensure_personality`] over every creature, returning how many were newly assigned.
pub fn ensure_all_personalities<R: Rng + ?Sized>(world: &mut World, rng: &mut R) -> usize {
    let mut assigned = 0;
    for creature in world.swarms.iter_mut().flat_map(|s| s.creatures.iter_mut()) {
        if creature.personality.is_none() {
            ensure_personality(creature, rng);
            assigned += 1;
        }
    }
    assigned
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use swarm_common::{Behavior, CreatureId, Vec2};

    #[test]
    fn traits_fall_in_their_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let p = roll_personality(&mut rng);
            assert!((0.5..=1.0).contains(&p.jitteriness));
            assert!((0.8..=1.2).contains(&p.speed_variation));
            assert!((0.7..=1.0).contains(&p.direction_persistence));
            assert!((0.0..=TAU).contains(&p.wander_angle));
            assert_eq!(p.wander_timer, 0);
        }
    }

    #[test]
    fn second_call_keeps_existing_traits() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut c = Creature::new(CreatureId(3), Vec2::ZERO, Vec2::ZERO);
        let first = *ensure_personality(&mut c, &mut rng);
        let second = *ensure_personality(&mut c, &mut rng);
        assert_eq!(first, second);
    }

    #[test]
    fn whole_world_is_assigned_once() {
        let mut world = World::new();
        let a = world.add_swarm("a", Behavior::Wander, 1.0);
        let b = world.add_swarm("b", Behavior::FleeMouse, 1.0);
        world.add_creature(a, Vec2::ZERO, Vec2::ZERO);
        world.add_creature(b, Vec2::ZERO, Vec2::ZERO);
        world.add_creature(b, Vec2::ZERO, Vec2::ZERO);
        world.swarms[1].creatures[0].personality = Some(roll_personality(&mut StdRng::seed_from_u64(2)));
        let kept = world.swarms[1].creatures[0].personality;

        let mut rng = StdRng::seed_from_u64(8);
        assert_eq!(ensure_all_personalities(&mut world, &mut rng), 2);
        assert!(world.swarms.iter().flat_map(|s| s.creatures.iter()).all(|c| c.personality.is_some()));
        assert_eq!(world.swarms[1].creatures[0].personality, kept);

        let before = world.clone();
        assert_eq!(ensure_all_personalities(&mut world, &mut rng), 0);
        assert_eq!(world, before);
    }
}
