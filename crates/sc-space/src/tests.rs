//! Integration tests for sc-space.

use sc_core::{CraftId, SimConfig, SimRng, Tick, Vec2};
use sc_craft::{Craft, Guidance};

use crate::{Space, SpaceObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

const DT: f64 = 1.0 / 15.0;

fn empty() -> Space {
    Space::new(SimRng::new(7))
}

fn plain(x: f64, y: f64, heading: f64, velocity: f64) -> Craft {
    Craft::new(Vec2::new(x, y), heading, velocity)
}

/// Records every hook invocation.
#[derive(Default)]
struct Recorder {
    starts:     Vec<Tick>,
    collisions: Vec<(Tick, CraftId, CraftId)>,
    crashed:    Vec<usize>,
    velocities: Vec<Vec<f64>>,
    ended:      Option<Tick>,
}

impl SpaceObserver for Recorder {
    fn on_tick_start(&mut self, tick: Tick) {
        self.starts.push(tick);
    }

    fn on_collision(&mut self, tick: Tick, a: CraftId, b: CraftId) {
        self.collisions.push((tick, a, b));
    }

    fn on_tick_end(&mut self, _tick: Tick, crashed: usize) {
        self.crashed.push(crashed);
    }

    fn on_snapshot(&mut self, _tick: Tick, space: &Space) {
        self.velocities.push(space.iter().map(Craft::velocity).collect());
    }

    fn on_run_end(&mut self, final_tick: Tick) {
        self.ended = Some(final_tick);
    }
}

// ── Collection ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod collection {
    use super::*;
    use crate::SpaceError;

    #[test]
    fn ids_are_sequential_and_stable() {
        let mut space = empty();
        let a = space.add(plain(0.0, 0.0, 0.0, 0.0)).unwrap();
        let b = space.add(plain(50.0, 0.0, 0.0, 0.0)).unwrap();
        let c = space.add(plain(100.0, 0.0, 0.0, 0.0)).unwrap();
        assert_eq!((a, b, c), (CraftId(0), CraftId(1), CraftId(2)));

        space.remove(b).unwrap();
        assert_eq!(space.ids().collect::<Vec<_>>(), vec![a, c]);
        assert_eq!(space.get(c).unwrap().position().x, 100.0);
        assert!(space.get(b).is_none());

        let d = space.add(plain(150.0, 0.0, 0.0, 0.0)).unwrap();
        assert_eq!(d, CraftId(3));
    }

    #[test]
    fn duplicate_ids_rejected() {
        let mut space = empty();
        let id = space.add(plain(0.0, 0.0, 0.0, 0.0)).unwrap();
        let copy = space.get(id).unwrap().clone();
        assert!(matches!(space.add(copy), Err(SpaceError::DuplicateCraft(_))));
        assert_eq!(space.len(), 1);
    }

    #[test]
    fn invalid_craft_rejected() {
        let mut space = empty();
        let bad = Craft::new(Vec2::new(f64::INFINITY, 0.0), 0.0, 0.0);
        assert!(matches!(space.add(bad), Err(SpaceError::Craft(_))));
    }

    #[test]
    fn unknown_ids_reported() {
        let mut space = empty();
        assert!(matches!(space.remove(CraftId(9)), Err(SpaceError::CraftNotFound(_))));
        assert!(matches!(
            space.act_on(CraftId(9), sc_craft::HighLevelAction::Faster),
            Err(SpaceError::CraftNotFound(_))
        ));
        assert!(space.close_neighbors(CraftId(9), 10.0, None, false, true).is_err());
    }

    #[test]
    fn clone_is_independent() {
        let mut space = empty();
        let id = space.add(plain(0.0, 0.0, 0.0, 10.0)).unwrap();
        let snapshot = space.clone();
        space.tick(DT).unwrap();
        assert_eq!(snapshot.get(id).unwrap().position(), Vec2::ZERO);
        assert!(space.get(id).unwrap().position().x > 0.0);
        assert_eq!(snapshot.get(id).unwrap().id(), id);
    }
}

// ── Tick loop ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tick_loop {
    use sc_craft::{Action, CraftError, HighLevelAction};

    use super::*;
    use crate::{Collision, SpaceError};

    #[test]
    fn each_pair_checked_once_in_order() {
        let mut space = empty();
        let a = space.add(plain(0.0, 0.0, 0.0, 1.0)).unwrap();
        let b = space.add(plain(1.0, 0.0, 0.0, 2.0)).unwrap();
        space.add(plain(2.0, 0.0, 0.0, 3.0)).unwrap();

        let hits = space.step(DT).unwrap();
        // (a, b) collides first; both are then crashed, so the remaining
        // pairs involving them are skipped.
        assert_eq!(hits, vec![Collision { a, b }]);
        assert_eq!(space.crashed_count(), 2);
    }

    #[test]
    fn invalid_time_step_propagates() {
        let mut space = empty();
        space.add(plain(0.0, 0.0, 0.0, 1.0)).unwrap();
        assert!(matches!(
            space.step(0.0),
            Err(SpaceError::Craft(CraftError::InvalidTimeStep(_)))
        ));
    }

    #[test]
    fn coincident_craft_far_from_origin_crash_on_tick() {
        let mut space = empty();
        let a = space.add(plain(0.0, 0.0, 0.0, 10.0)).unwrap();
        let b = space.add(plain(1e17, 0.0, 0.0, 0.0)).unwrap();
        let c = space.add(plain(1e17, 0.0, 0.0, 0.0)).unwrap();

        let hits = space.tick(DT).unwrap();
        assert_eq!(hits, vec![Collision { a: b, b: c }]);
        assert_eq!(space.current_tick(), Tick(1));
        assert_eq!(space.crashed_count(), 2);
        assert!(!space.get(a).unwrap().is_crashed());
    }

    #[test]
    fn failed_tick_leaves_space_untouched() {
        let mut space = empty();
        let good = space
            .add(Craft::autonomous(Vec2::ZERO, 0.0, 40.0, Guidance::new(50.0)))
            .unwrap();
        let bad = space
            .add(Craft::autonomous(Vec2::new(50.0, 0.0), 0.0, 40.0, Guidance::new(50.0)))
            .unwrap();
        space.get_mut(bad).unwrap().guidance_mut().unwrap().target_velocity = f64::NAN;
        let before = *space.get(good).unwrap().state();

        assert!(matches!(
            space.tick(DT),
            Err(SpaceError::Craft(CraftError::NonFiniteAction { .. }))
        ));
        let craft = space.get(good).unwrap();
        assert_eq!(craft.action(), Action::IDLE);
        assert_eq!(*craft.state(), before);
        assert_eq!(space.current_tick(), Tick::ZERO);
    }

    #[test]
    fn act_refreshes_guided_and_keeps_plain() {
        let mut space = empty();
        let p = space.add(plain(0.0, 0.0, 0.0, 10.0)).unwrap();
        let g = space
            .add(Craft::autonomous(Vec2::new(50.0, 0.0), 0.0, 40.0, Guidance::new(50.0)))
            .unwrap();
        space.get_mut(p).unwrap().set_action(Action::new(0.0, 1.5)).unwrap();

        space.act().unwrap();
        assert_eq!(space.get(p).unwrap().action(), Action::new(0.0, 1.5));
        assert!((space.get(g).unwrap().action().acceleration - 10.0 * Guidance::KP_A).abs() < 1e-12);
    }

    #[test]
    fn intent_survives_the_following_tick() {
        let mut space = empty();
        let ego = space
            .add(Craft::controlled(Vec2::ZERO, 0.0, 50.0, Guidance::new(50.0)))
            .unwrap();
        space.act_on(ego, HighLevelAction::Faster).unwrap();
        space.tick(DT).unwrap();
        let craft = space.get(ego).unwrap();
        assert_eq!(craft.guidance().unwrap().target_velocity, 55.0);
        assert!(craft.velocity() > 50.0);
    }

    #[test]
    fn history_follows_space_flag() {
        let mut space = empty();
        let id = space.add(plain(0.0, 0.0, 0.0, 10.0)).unwrap();
        space.tick(DT).unwrap();
        assert!(space.get(id).unwrap().history().is_empty());
        space.record_history = true;
        for _ in 0..40 {
            space.tick(DT).unwrap();
        }
        assert_eq!(space.get(id).unwrap().history().len(), 30);
    }

    #[test]
    fn run_ticks_reports_every_boundary() {
        let mut space = empty();
        space.add(plain(0.0, 0.0, 0.0, 10.0)).unwrap();
        let mut rec = Recorder::default();
        space.run_ticks(4, DT, &mut rec).unwrap();
        assert_eq!(rec.starts, vec![Tick(0), Tick(1), Tick(2), Tick(3)]);
        assert_eq!(rec.crashed, vec![0; 4]);
        assert_eq!(rec.velocities.len(), 4);
        assert_eq!(rec.ended, Some(Tick(4)));
        assert_eq!(space.current_tick(), Tick(4));
    }

    #[test]
    fn crash_at_tick_five_then_monotonic_decay() {
        let mut space = empty();
        // Same heading, closing at 20 m/s.  The shrunken footprints first
        // overlap once the gap falls to 8.1 m, during the sixth tick.
        let a = space.add(plain(0.0, 0.0, 0.0, 30.0)).unwrap();
        let b = space.add(plain(15.5, 0.0, 0.0, 10.0)).unwrap();

        let mut rec = Recorder::default();
        space.run_ticks(40, DT, &mut rec).unwrap();

        assert_eq!(rec.collisions, vec![(Tick(5), a, b)]);
        assert_eq!(&rec.crashed[..5], &[0; 5]);
        assert!(rec.crashed[5..].iter().all(|&n| n == 2));

        // Both took the smaller-magnitude velocity, then brake every tick.
        for window in rec.velocities[5..].windows(2) {
            for (before, after) in window[0].iter().zip(&window[1]) {
                assert!(after < before, "{after} !< {before}");
                assert!(*after >= 0.0);
            }
        }
        let last = rec.velocities.last().unwrap();
        assert_eq!(last[0], last[1]);
    }

    #[test]
    fn ticks_are_deterministic() {
        let build = || {
            crate::SpaceBuilder::new(SimConfig { seed: 11, ..SimConfig::default() })
                .random_craft(6)
                .area(60.0)
                .build()
                .unwrap()
        };
        let mut a = build();
        let mut b = build();
        for _ in 0..60 {
            a.tick(DT).unwrap();
            b.tick(DT).unwrap();
        }
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.state(), y.state());
            assert_eq!(x.is_crashed(), y.is_crashed());
        }
    }
}

#[cfg(all(test, feature = "parallel"))]
mod parallel {
    use sc_craft::check_collision;

    use super::*;

    #[test]
    fn parallel_step_matches_sequential() {
        let mut space = crate::SpaceBuilder::new(SimConfig { seed: 5, ..SimConfig::default() })
            .random_craft(24)
            .area(80.0)
            .build()
            .unwrap();
        let mut expected: Vec<Craft> = space.iter().cloned().collect();

        for _ in 0..30 {
            space.step(DT).unwrap();

            for craft in &mut expected {
                craft.step(DT, false).unwrap();
            }
            for i in 0..expected.len() {
                let (head, tail) = expected.split_at_mut(i + 1);
                for other in tail.iter_mut() {
                    check_collision(&mut head[i], other).unwrap();
                }
            }
        }

        for (got, want) in space.iter().zip(&expected) {
            assert_eq!(got.id(), want.id());
            assert_eq!(got.state(), want.state());
            assert_eq!(got.is_crashed(), want.is_crashed());
        }
    }
}

// ── Queries ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod queries {
    use super::*;
    use crate::ProximityIndex;

    /// Ego at the origin heading +x, plus a ring of others.
    fn neighbourhood() -> (Space, [CraftId; 6]) {
        let mut space = empty();
        let ego = space.add(plain(0.0, 0.0, 0.0, 0.0)).unwrap();
        let ahead = space.add(plain(12.0, 1.0, 0.0, 0.0)).unwrap();
        let near_behind = space.add(plain(-10.0, 0.0, 0.0, 0.0)).unwrap();
        let far_behind = space.add(plain(-20.0, -1.0, 0.0, 0.0)).unwrap();
        let edge = space.add(plain(25.0, 0.0, 0.0, 0.0)).unwrap();
        let side = space.add(plain(0.0, 8.0, 0.0, 0.0)).unwrap();
        (space, [ego, ahead, near_behind, far_behind, edge, side])
    }

    #[test]
    fn close_neighbors_filters_radius_and_behind() {
        let (space, [ego, ahead, near_behind, far_behind, _edge, side]) = neighbourhood();

        let all = space.close_neighbors(ego, 25.0, None, false, true).unwrap();
        assert_eq!(all, vec![ahead, near_behind, far_behind, side]);

        let front = space.close_neighbors(ego, 25.0, None, false, false).unwrap();
        assert_eq!(front, vec![ahead, near_behind, side]);
    }

    #[test]
    fn close_neighbors_sorts_and_truncates() {
        let (space, [ego, ahead, near_behind, _, _, side]) = neighbourhood();
        let sorted = space.close_neighbors(ego, 25.0, None, true, true).unwrap();
        assert_eq!(&sorted[..3], &[side, near_behind, ahead]);
        let two = space.close_neighbors(ego, 25.0, Some(2), true, true).unwrap();
        assert_eq!(two, vec![side, near_behind]);
    }

    #[test]
    fn neighbours_ahead_and_behind_in_band() {
        let (space, [ego, ahead, near_behind, ..]) = neighbourhood();
        assert_eq!(space.neighbours(ego).unwrap(), (Some(ahead), Some(near_behind)));

        let mut lonely = empty();
        let only = lonely.add(plain(0.0, 0.0, 0.0, 0.0)).unwrap();
        assert_eq!(lonely.neighbours(only).unwrap(), (None, None));
    }

    #[test]
    fn simplified_keeps_perceived_craft() {
        let (space, [ego, ahead, near_behind, _, _, side]) = neighbourhood();
        let view = space.simplified(ego, 15.0).unwrap();
        assert_eq!(view.ids().collect::<Vec<_>>(), vec![ego, ahead, near_behind, side]);
        assert_eq!(view.get(ahead).unwrap().position(), Vec2::new(12.0, 1.0));
        assert_eq!(space.len(), 6);
    }

    #[test]
    fn randomize_behavior_redraws_autonomous_targets() {
        let mut space = empty();
        let p = space.add(plain(0.0, 0.0, 0.0, 5.0)).unwrap();
        let ids: Vec<CraftId> = (0..5)
            .map(|i| {
                let pos = Vec2::new(20.0 * (i + 1) as f64, 0.0);
                space.add(Craft::autonomous(pos, 0.0, 0.0, Guidance::new(0.0))).unwrap()
            })
            .collect();

        let copy = space.randomize_behavior();
        for id in &ids {
            let target = copy.get(*id).unwrap().guidance().unwrap().target_velocity;
            assert!((50.0..=60.0).contains(&target));
            assert_eq!(space.get(*id).unwrap().guidance().unwrap().target_velocity, 0.0);
        }
        assert!(copy.get(p).unwrap().guidance().is_none());
    }

    #[test]
    fn proximity_index_matches_scan() {
        let (space, [ego, ..]) = neighbourhood();
        let index = ProximityIndex::build(&space);
        assert_eq!(index.len(), 6);

        let scan = space.close_neighbors(ego, 25.0, None, true, true).unwrap();
        let mut from_index = index.within(Vec2::ZERO, 25.0);
        assert_eq!(from_index.remove(0), ego);
        assert_eq!(from_index, scan);

        assert_eq!(index.nearest(Vec2::new(24.0, 0.0)), space.ids().nth(4));
        assert_eq!(index.k_nearest(Vec2::ZERO, 2)[0], ego);
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use super::*;
    use crate::{SpaceBuilder, SpaceError};

    #[test]
    fn random_craft_are_spaced_and_in_range() {
        let space = SpaceBuilder::new(SimConfig::default())
            .craft(plain(0.0, 0.0, 0.0, 20.0))
            .random_craft(12)
            .area(120.0)
            .build()
            .unwrap();
        assert_eq!(space.len(), 13);

        let craft = space.craft();
        for (i, a) in craft.iter().enumerate() {
            for b in &craft[i + 1..] {
                assert!(a.position().distance(b.position()) >= Craft::LENGTH);
            }
        }
        for c in &craft[1..] {
            assert_eq!(c.kind().label(), "autonomous");
            assert!((50.0..=60.0).contains(&c.velocity()));
            assert!(c.position().x.abs() <= 60.0 && c.position().y.abs() <= 60.0);
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let build = |seed| {
            SpaceBuilder::new(SimConfig { seed, ..SimConfig::default() })
                .random_craft(4)
                .build()
                .unwrap()
        };
        let (a, b, c) = (build(3), build(3), build(4));
        let positions = |s: &Space| s.iter().map(Craft::position).collect::<Vec<_>>();
        assert_eq!(positions(&a), positions(&b));
        assert_ne!(positions(&a), positions(&c));
    }

    #[test]
    fn crowded_area_fails_cleanly() {
        let result = SpaceBuilder::new(SimConfig::default()).random_craft(50).area(10.0).build();
        assert!(matches!(result, Err(SpaceError::Config(_))));
    }

    #[test]
    fn invalid_config_rejected() {
        let config = SimConfig { policy_frequency: 0, ..SimConfig::default() };
        assert!(matches!(SpaceBuilder::new(config).build(), Err(SpaceError::Config(_))));
    }

    #[test]
    fn history_flag_comes_from_config() {
        let config = SimConfig { record_history: true, ..SimConfig::default() };
        assert!(SpaceBuilder::new(config).build().unwrap().record_history);
    }
}
