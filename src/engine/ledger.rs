use std::collections::{HashMap, VecDeque};

use crate::limits::SEAT_BUCKETS;
use crate::model::*;

/// Owns every known group and the per-size wait queues.
///
/// Queue entries are copies taken at enqueue time. Nothing removes a copy when
/// its group is dropped or seated elsewhere; scans discard stale heads instead.
#[derive(Debug)]
pub struct GroupLedger {
    groups: HashMap<GroupId, Group>,
    queues: [VecDeque<Group>; SEAT_BUCKETS],
    /// Last arrival number handed out.
    arrivals: Arrival,
    /// Groups with a car, kept in step with `assign` and `remove`.
    traveling: usize,
}

impl Default for GroupLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl GroupLedger {
    pub fn new() -> Self {
        Self {
            groups: HashMap::new(),
            queues: Default::default(),
            arrivals: 0,
            traveling: 0,
        }
    }

    /// Forget every group, queue entry and the arrival counter.
    pub fn clear(&mut self) {
        self.groups.clear();
        for queue in &mut self.queues {
            queue.clear();
        }
        self.arrivals = 0;
        self.traveling = 0;
    }

    pub fn get(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(&id)
    }

    pub fn contains(&self, id: GroupId) -> bool {
        self.groups.contains_key(&id)
    }

    /// Record a new group with the next arrival number. Caller checks `contains` first.
    pub fn admit(&mut self, id: GroupId, people: u8) -> Group {
        debug_assert!(!self.contains(id), "group {id} admitted twice");
        self.arrivals += 1;
        let group = Group::waiting(id, people, self.arrivals);
        self.groups.insert(id, group);
        group
    }

    pub fn enqueue(&mut self, group: Group) {
        self.queues[bucket(group.people)].push_back(group);
    }

    pub fn remove(&mut self, id: GroupId) -> Option<Group> {
        let group = self.groups.remove(&id)?;
        if group.is_traveling() {
            self.traveling -= 1;
        }
        Some(group)
    }

    /// Mark a group as riding in `car_id`. Returns the updated entry.
    pub fn assign(&mut self, id: GroupId, car_id: CarId) -> Option<Group> {
        let group = self.groups.get_mut(&id)?;
        if !group.is_traveling() {
            self.traveling += 1;
        }
        group.car = Some(car_id);
        Some(*group)
    }

    fn is_live(&self, entry: &Group) -> bool {
        self.groups.get(&entry.id) == Some(entry)
    }

    /// Drop queue heads that no longer match their ledger entry, in every queue.
    /// Returns how many entries were discarded.
    pub fn prune(&mut self) -> usize {
        let mut pruned = 0;
        for k in 0..SEAT_BUCKETS {
            while let Some(head) = self.queues[k].front() {
                if self.is_live(head) {
                    break;
                }
                self.queues[k].pop_front();
                pruned += 1;
            }
        }
        pruned
    }

    /// Earliest-arrived queue head among groups of at most `max_people`.
    /// Heads must already be pruned.
    pub fn select_candidate(&self, max_people: u8) -> Option<Group> {
        let max = (max_people as usize).min(SEAT_BUCKETS);
        self.queues[..max]
            .iter()
            .filter_map(|queue| queue.front())
            .min_by_key(|group| group.arrival)
            .copied()
    }

    /// Pop the head of the queue for `people`, returning it.
    pub fn pop(&mut self, people: u8) -> Option<Group> {
        self.queues[bucket(people)].pop_front()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.values()
    }

    /// Raw queue length, stale entries included.
    pub fn queued(&self, people: u8) -> usize {
        self.queues[bucket(people)].len()
    }

    pub fn traveling(&self) -> usize {
        self.traveling
    }
}
