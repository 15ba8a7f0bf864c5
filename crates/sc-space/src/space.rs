//! The `Space` aggregate and its tick loop.

use log::{debug, trace};
use sc_core::{CraftId, SimRng, Tick};
use sc_craft::{Craft, CraftKind, HighLevelAction, check_collision};

use crate::{SpaceError, SpaceObserver, SpaceResult};

#[cfg(not(feature = "fx-hash"))]
type IdMap = std::collections::HashMap<CraftId, usize>;
#[cfg(feature = "fx-hash")]
type IdMap = rustc_hash::FxHashMap<CraftId, usize>;

/// One pair of craft that collided during a step, in pair order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Collision {
    pub a: CraftId,
    pub b: CraftId,
}

// ── Space ─────────────────────────────────────────────────────────────────────

/// Owns an ordered collection of craft and advances them together.
///
/// Insertion order is significant: the act phase and the collision pairing
/// both walk craft in the order they were added.  Craft are addressed by
/// [`CraftId`] handles that stay valid across removals of other craft.
///
/// `Space: Clone` produces an independent copy with the same ids, state and
/// RNG position, suitable for look-ahead rollouts.
///
/// Create via [`SpaceBuilder`][crate::SpaceBuilder] or [`Space::new`].
#[derive(Clone, Debug)]
pub struct Space {
    craft:   Vec<Craft>,
    index:   IdMap,
    next_id: CraftId,
    rng:     SimRng,
    tick:    Tick,

    /// Push a history snapshot on every integration step.
    pub record_history: bool,
}

impl Space {
    pub fn new(rng: SimRng) -> Self {
        Self {
            craft:          Vec::new(),
            index:          IdMap::default(),
            next_id:        CraftId(0),
            rng,
            tick:           Tick::ZERO,
            record_history: false,
        }
    }

    // ── Collection ────────────────────────────────────────────────────────

    /// Add `craft` at the end of the insertion order and return its id.
    ///
    /// Unassigned craft receive the next free id.  A craft that already
    /// carries an id (e.g. copied out of another space) keeps it, as long as
    /// this space does not hold that id yet.
    pub fn add(&mut self, craft: Craft) -> SpaceResult<CraftId> {
        craft.validate()?;
        let id = if craft.id().is_assigned() {
            let id = craft.id();
            if self.index.contains_key(&id) {
                return Err(SpaceError::DuplicateCraft(id));
            }
            if id >= self.next_id {
                self.next_id = id.next();
            }
            id
        } else {
            let id = self.next_id;
            self.next_id = id.next();
            id
        };

        debug!("adding {id} ({}) at {}", craft.kind().label(), craft.position());
        self.index.insert(id, self.craft.len());
        self.craft.push(craft.with_id(id));
        Ok(id)
    }

    /// Remove and return the craft with `id`, preserving the order of the
    /// remaining craft.
    pub fn remove(&mut self, id: CraftId) -> SpaceResult<Craft> {
        let pos = self.index.remove(&id).ok_or(SpaceError::CraftNotFound(id))?;
        let craft = self.craft.remove(pos);
        for c in &self.craft[pos..] {
            if let Some(slot) = self.index.get_mut(&c.id()) {
                *slot -= 1;
            }
        }
        debug!("removed {id}");
        Ok(craft)
    }

    pub fn get(&self, id: CraftId) -> Option<&Craft> {
        self.index.get(&id).map(|&i| &self.craft[i])
    }

    pub fn get_mut(&mut self, id: CraftId) -> Option<&mut Craft> {
        self.index.get(&id).map(|&i| &mut self.craft[i])
    }

    fn require(&self, id: CraftId) -> SpaceResult<&Craft> {
        self.get(id).ok_or(SpaceError::CraftNotFound(id))
    }

    pub fn contains(&self, id: CraftId) -> bool {
        self.index.contains_key(&id)
    }

    /// All craft in insertion order.
    pub fn craft(&self) -> &[Craft] {
        &self.craft
    }

    pub fn iter(&self) -> impl Iterator<Item = &Craft> + '_ {
        self.craft.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = CraftId> + '_ {
        self.craft.iter().map(Craft::id)
    }

    pub fn len(&self) -> usize {
        self.craft.len()
    }

    pub fn is_empty(&self) -> bool {
        self.craft.is_empty()
    }

    pub fn crashed_count(&self) -> usize {
        self.craft.iter().filter(|c| c.is_crashed()).count()
    }

    /// Number of ticks run so far.
    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    pub fn rng_mut(&mut self) -> &mut SimRng {
        &mut self.rng
    }

    // ── Tick phases ───────────────────────────────────────────────────────

    /// Every craft runs its decision procedure with no new intent.
    pub fn act(&mut self) -> SpaceResult<()> {
        for craft in &mut self.craft {
            craft.act(None)?;
        }
        Ok(())
    }

    /// Forward `intent` to one craft and let it recompute its actuation.
    pub fn act_on(&mut self, id: CraftId, intent: HighLevelAction) -> SpaceResult<()> {
        let craft = self.get_mut(id).ok_or(SpaceError::CraftNotFound(id))?;
        craft.act(Some(intent))?;
        Ok(())
    }

    /// Integrate every craft by `dt`, then check every unordered pair once.
    ///
    /// Returns the pairs that collided this step.  On error every craft is
    /// left as it was before the call.
    pub fn step(&mut self, dt: f64) -> SpaceResult<Vec<Collision>> {
        let before = self.craft.clone();
        self.step_all(dt).inspect_err(|_| self.craft = before)
    }

    fn step_all(&mut self, dt: f64) -> SpaceResult<Vec<Collision>> {
        self.integrate(dt)?;

        let mut hits = Vec::new();
        let n = self.craft.len();
        for i in 0..n {
            let (head, tail) = self.craft.split_at_mut(i + 1);
            let a = &mut head[i];
            for b in tail.iter_mut() {
                if check_collision(a, b)? {
                    hits.push(Collision { a: a.id(), b: b.id() });
                }
            }
        }
        Ok(hits)
    }

    fn integrate(&mut self, dt: f64) -> SpaceResult<()> {
        let record = self.record_history;

        #[cfg(not(feature = "parallel"))]
        {
            for craft in &mut self.craft {
                craft.step(dt, record)?;
            }
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            self.craft.par_iter_mut().try_for_each(|craft| craft.step(dt, record))?;
        }

        Ok(())
    }

    /// One full tick: act, then step.
    ///
    /// A failed tick is rejected whole: craft are restored and the tick
    /// counter does not advance.
    pub fn tick(&mut self, dt: f64) -> SpaceResult<Vec<Collision>> {
        let before = self.craft.clone();
        let hits = match self.act().and_then(|()| self.step_all(dt)) {
            Ok(hits) => hits,
            Err(e) => {
                self.craft = before;
                return Err(e);
            }
        };
        trace!("{} complete: {} collisions", self.tick, hits.len());
        self.tick = self.tick + 1;
        Ok(hits)
    }

    /// Run exactly `n` ticks, reporting to `observer` at every boundary.
    pub fn run_ticks<O: SpaceObserver>(
        &mut self,
        n:        u64,
        dt:       f64,
        observer: &mut O,
    ) -> SpaceResult<()> {
        for _ in 0..n {
            let now = self.tick;
            observer.on_tick_start(now);
            let hits = self.tick(dt)?;
            for hit in hits {
                observer.on_collision(now, hit.a, hit.b);
            }
            observer.on_tick_end(now, self.crashed_count());
            observer.on_snapshot(now, self);
        }
        observer.on_run_end(self.tick);
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Craft strictly within `radius` of `origin`, excluding `origin`.
    ///
    /// Unless `include_behind` is set, craft more than two origin lengths
    /// behind the origin along its heading are dropped.  With `sort` the
    /// result is ordered by distance; `count` truncates it.
    pub fn close_neighbors(
        &self,
        origin:         CraftId,
        radius:         f64,
        count:          Option<usize>,
        sort:           bool,
        include_behind: bool,
    ) -> SpaceResult<Vec<CraftId>> {
        let ego = self.require(origin)?;
        let center = ego.position();
        let direction = ego.direction();
        let behind_limit = -2.0 * ego.length();

        let mut found: Vec<(f64, CraftId)> = self
            .craft
            .iter()
            .filter(|c| c.id() != origin)
            .filter_map(|c| {
                let offset = c.position() - center;
                let distance = offset.length();
                if distance >= radius {
                    return None;
                }
                if !include_behind && offset.dot(direction) < behind_limit {
                    return None;
                }
                Some((distance, c.id()))
            })
            .collect();

        if sort {
            found.sort_by(|a, b| a.0.total_cmp(&b.0));
        }
        if let Some(count) = count {
            found.truncate(count);
        }
        Ok(found.into_iter().map(|(_, id)| id).collect())
    }

    /// Nearest craft ahead of and behind `id` along its heading, within a
    /// lateral band of one craft width either side.
    pub fn neighbours(&self, id: CraftId) -> SpaceResult<(Option<CraftId>, Option<CraftId>)> {
        let ego = self.require(id)?;
        let center = ego.position();
        let direction = ego.direction();
        let band = ego.width();

        let mut ahead: Option<(f64, CraftId)> = None;
        let mut behind: Option<(f64, CraftId)> = None;
        for other in self.craft.iter().filter(|c| c.id() != id) {
            let offset = other.position() - center;
            if direction.cross(offset).abs() > band {
                continue;
            }
            let s = offset.dot(direction);
            if s > 0.0 {
                if ahead.is_none_or(|(best, _)| s < best) {
                    ahead = Some((s, other.id()));
                }
            } else if behind.is_none_or(|(best, _)| s > best) {
                behind = Some((s, other.id()));
            }
        }
        Ok((ahead.map(|(_, id)| id), behind.map(|(_, id)| id)))
    }

    // ── Derived spaces ────────────────────────────────────────────────────

    /// A copy holding only `ego` and the craft it can perceive ahead of it
    /// within `perception_distance`.  Ids and relative order are preserved.
    pub fn simplified(&self, ego: CraftId, perception_distance: f64) -> SpaceResult<Space> {
        let mut keep = self.close_neighbors(ego, perception_distance, None, false, false)?;
        keep.push(ego);

        let mut copy = Space {
            craft:          Vec::with_capacity(keep.len()),
            index:          IdMap::default(),
            next_id:        self.next_id,
            rng:            self.rng.clone(),
            tick:           self.tick,
            record_history: self.record_history,
        };
        for craft in self.craft.iter().filter(|c| keep.contains(&c.id())) {
            copy.index.insert(craft.id(), copy.craft.len());
            copy.craft.push(craft.clone());
        }
        Ok(copy)
    }

    /// A copy in which every autonomous craft has a freshly drawn target
    /// velocity from [`Craft::DEFAULT_VELOCITIES`].
    ///
    /// Draws come from this space's RNG, so successive calls differ.  The copy
    /// gets a child stream of its own.
    pub fn randomize_behavior(&mut self) -> Space {
        let mut copy = self.clone();
        let [low, high] = Craft::DEFAULT_VELOCITIES;
        for craft in &mut copy.craft {
            if !matches!(craft.kind(), CraftKind::Autonomous(_)) {
                continue;
            }
            if let Some(guidance) = craft.guidance_mut() {
                guidance.target_velocity = self.rng.gen_range(low..=high);
            }
        }
        copy.rng = self.rng.child(self.tick.0);
        copy
    }
}
