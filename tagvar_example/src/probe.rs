//! A value with observable construction, cloning and dropping.
//!
//! Every [`Probe`] belongs to a [`Ledger`], and records what happens to it there. Tests use
//! this to count exactly which values a variant drops, and when.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

/// Something that happened to a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A probe was created by [`Ledger::probe`].
    Created(u32),
    /// Probe `id` was created by cloning probe `from`.
    Cloned {
        /// The probe that was cloned.
        from: u32,
        /// The new probe.
        id: u32,
    },
    /// A probe was dropped.
    Dropped(u32),
}

#[derive(Debug, Default)]
struct Entries {
    next_id: u32,
    events: Vec<Event>,
}

impl Entries {
    fn record(&mut self, event: Event) {
        debug!("probe event: {:?}", event);
        self.events.push(event);
    }

    fn fresh_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Shared record of probe events. Cloning a `Ledger` shares the record.
///
/// # Examples
///
/// ```
/// use tagvar_example::probe::{Event, Ledger};
///
/// let ledger = Ledger::new();
/// let a = ledger.probe();
/// let b = a.clone();
/// drop(a);
/// assert_eq!(
///     ledger.events(),
///     vec![Event::Created(0), Event::Cloned { from: 0, id: 1 }, Event::Dropped(0)],
/// );
/// assert_eq!(ledger.live(), vec![b.id()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Ledger(Rc<RefCell<Entries>>);

impl Ledger {
    /// An empty ledger.
    pub fn new() -> Self {
        Ledger::default()
    }

    /// Creates a new probe recording into this ledger.
    pub fn probe(&self) -> Probe {
        let mut entries = self.0.borrow_mut();
        let id = entries.fresh_id();
        entries.record(Event::Created(id));
        Probe {
            id,
            ledger: self.clone(),
        }
    }

    /// All events so far, oldest first.
    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().events.clone()
    }

    /// Ids of dropped probes, in drop order.
    pub fn dropped(&self) -> Vec<u32> {
        self.0
            .borrow()
            .events
            .iter()
            .filter_map(|e| match e {
                Event::Dropped(id) => Some(*id),
                _ => None,
            })
            .collect()
    }

    /// Ids of probes that were created or cloned and not yet dropped, in creation order.
    pub fn live(&self) -> Vec<u32> {
        let entries = self.0.borrow();
        let dropped = self.dropped();
        entries
            .events
            .iter()
            .filter_map(|e| match e {
                Event::Created(id) | Event::Cloned { id, .. } => Some(*id),
                Event::Dropped(_) => None,
            })
            .filter(|id| !dropped.contains(id))
            .collect()
    }
}

/// A value that records its own creation, cloning and dropping in a [`Ledger`].
#[derive(Debug)]
pub struct Probe {
    id: u32,
    ledger: Ledger,
}

impl Probe {
    /// This probe's id, unique within its ledger.
    pub fn id(&self) -> u32 {
        self.id
    }
}

impl Clone for Probe {
    fn clone(&self) -> Self {
        let mut entries = self.ledger.0.borrow_mut();
        let id = entries.fresh_id();
        entries.record(Event::Cloned { from: self.id, id });
        Probe {
            id,
            ledger: self.ledger.clone(),
        }
    }
}

impl Drop for Probe {
    fn drop(&mut self) {
        self.ledger.0.borrow_mut().record(Event::Dropped(self.id));
    }
}

/// Probes compare by id.
impl PartialEq for Probe {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
