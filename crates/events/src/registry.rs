//! Subscriber registry and synchronous broadcast.
//!
//! A subject owns one [`Registry`]; the registry only holds [`Weak`] handles, so
//! subscribers are owned by whoever created them and may be shared across many
//! subjects. Broadcast order is attachment order.
//!
//! ## Re-entrancy
//!
//! A subscriber's reaction receives `&mut` access to the subject and may mutate
//! it, which usually triggers a nested [`broadcast`] before the outer one has
//! finished. [`broadcast`] therefore iterates a point-in-time snapshot taken when
//! it starts:
//!
//! - a subscriber detached mid-broadcast still receives the current broadcast;
//! - a subscriber attached mid-broadcast only receives later broadcasts;
//! - nested broadcasts take their own snapshot and run to completion before the
//!   outer iteration resumes.

use std::rc::{Rc, Weak};

/// Something that reacts to changes of a subject of type `T`.
pub trait Subscriber<T: Subject + ?Sized> {
    /// Called once per broadcast, in attachment order.
    ///
    /// An error aborts the remaining broadcast and is returned to whoever mutated
    /// the subject.
    fn react(&self, subject: &mut T) -> Result<(), T::Error>;
}

/// A value that owns a subscriber registry and notifies it after mutations.
pub trait Subject {
    type Error;

    fn registry(&self) -> &Registry<dyn Subscriber<Self>>;
}

/// Ordered list of non-owning subscriber handles.
///
/// Identity is pointer identity of the shared allocation; the same subscriber may
/// be attached more than once and is then invoked once per entry.
pub struct Registry<S: ?Sized> {
    subscribers: Vec<Weak<S>>,
}

impl<S: ?Sized> Registry<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a subscriber. Re-attaching produces a second entry.
    ///
    /// The registry does not keep the subscriber alive: once the caller drops its
    /// last `Rc`, the entry is skipped and eventually pruned.
    pub fn attach(&mut self, subscriber: &Rc<S>) {
        self.prune();
        self.subscribers.push(Rc::downgrade(subscriber));
    }

    /// Remove the first entry for `subscriber`. Returns `false` (and changes
    /// nothing) if it was not attached.
    pub fn detach(&mut self, subscriber: &Rc<S>) -> bool {
        let target = Rc::downgrade(subscriber);
        match self.subscribers.iter().position(|w| Weak::ptr_eq(w, &target)) {
            Some(index) => {
                self.subscribers.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, subscriber: &Rc<S>) -> bool {
        let target = Rc::downgrade(subscriber);
        self.subscribers.iter().any(|w| Weak::ptr_eq(w, &target))
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.subscribers.iter().filter(|w| w.strong_count() > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live subscribers in attachment order, as of now.
    pub fn snapshot(&self) -> Vec<Rc<S>> {
        self.subscribers.iter().filter_map(Weak::upgrade).collect()
    }

    fn prune(&mut self) {
        self.subscribers.retain(|w| w.strong_count() > 0);
    }
}

impl<S: ?Sized> Default for Registry<S> {
    fn default() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }
}

impl<S: ?Sized> core::fmt::Debug for Registry<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Registry")
            .field("subscribers", &self.len())
            .finish()
    }
}

/// Invoke every subscriber of `subject` once, in attachment order.
///
/// Runs synchronously; returns after the last reaction (including any nested
/// broadcasts it caused) or at the first error.
pub fn broadcast<T>(subject: &mut T) -> Result<(), T::Error>
where
    T: Subject + ?Sized,
{
    let snapshot = subject.registry().snapshot();
    tracing::debug!(subscribers = snapshot.len(), "broadcast");

    for subscriber in &snapshot {
        subscriber.react(subject)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Probe {
        log: Vec<String>,
        nested: bool,
        registry: Registry<dyn Subscriber<Probe>>,
    }

    impl Subject for Probe {
        type Error = String;

        fn registry(&self) -> &Registry<dyn Subscriber<Self>> {
            &self.registry
        }
    }

    struct Label(&'static str);

    impl Subscriber<Probe> for Label {
        fn react(&self, probe: &mut Probe) -> Result<(), String> {
            probe.log.push(self.0.to_string());
            Ok(())
        }
    }

    /// Broadcasts again from inside its own reaction, once.
    struct Nester;

    impl Subscriber<Probe> for Nester {
        fn react(&self, probe: &mut Probe) -> Result<(), String> {
            if !probe.nested {
                probe.nested = true;
                probe.log.push("nest".to_string());
                broadcast(probe)?;
            }
            Ok(())
        }
    }

    struct Detacher {
        victim: Rc<dyn Subscriber<Probe>>,
    }

    impl Subscriber<Probe> for Detacher {
        fn react(&self, probe: &mut Probe) -> Result<(), String> {
            probe.registry.detach(&self.victim);
            probe.log.push("detach".to_string());
            Ok(())
        }
    }

    /// Attaches `late` the first time it reacts.
    struct Attacher {
        late: Rc<dyn Subscriber<Probe>>,
    }

    impl Subscriber<Probe> for Attacher {
        fn react(&self, probe: &mut Probe) -> Result<(), String> {
            if !probe.registry.contains(&self.late) {
                probe.registry.attach(&self.late);
            }
            probe.log.push("attach".to_string());
            Ok(())
        }
    }

    struct Failing;

    impl Subscriber<Probe> for Failing {
        fn react(&self, _probe: &mut Probe) -> Result<(), String> {
            Err("boom".to_string())
        }
    }

    fn handle<S: Subscriber<Probe> + 'static>(s: S) -> Rc<dyn Subscriber<Probe>> {
        Rc::new(s)
    }

    #[test]
    fn broadcast_follows_attachment_order() {
        let a = handle(Label("a"));
        let b = handle(Label("b"));
        let mut probe = Probe::default();
        probe.registry.attach(&b);
        probe.registry.attach(&a);

        broadcast(&mut probe).unwrap();

        assert_eq!(probe.log, vec!["b", "a"]);
    }

    #[test]
    fn duplicates_are_invoked_once_per_entry() {
        let a = handle(Label("a"));
        let mut probe = Probe::default();
        probe.registry.attach(&a);
        probe.registry.attach(&a);

        broadcast(&mut probe).unwrap();

        assert_eq!(probe.log, vec!["a", "a"]);
        assert_eq!(probe.registry.len(), 2);
    }

    #[test]
    fn detach_removes_only_the_first_entry() {
        let a = handle(Label("a"));
        let mut probe = Probe::default();
        probe.registry.attach(&a);
        probe.registry.attach(&a);

        assert!(probe.registry.detach(&a));
        assert_eq!(probe.registry.len(), 1);
        assert!(probe.registry.contains(&a));
    }

    #[test]
    fn detach_of_absent_subscriber_is_a_no_op() {
        let a = handle(Label("a"));
        let stranger = handle(Label("stranger"));
        let mut probe = Probe::default();
        probe.registry.attach(&a);

        assert!(!probe.registry.detach(&stranger));
        assert_eq!(probe.registry.len(), 1);
        assert!(probe.registry.contains(&a));
    }

    #[test]
    fn broadcast_on_empty_registry_is_ok() {
        let mut probe = Probe::default();
        broadcast(&mut probe).unwrap();
        assert!(probe.log.is_empty());
        assert!(probe.registry.is_empty());
    }

    #[test]
    fn nested_broadcast_completes_before_outer_resumes() {
        let a = handle(Label("a"));
        let nester = handle(Nester);
        let b = handle(Label("b"));
        let mut probe = Probe::default();
        probe.registry.attach(&a);
        probe.registry.attach(&nester);
        probe.registry.attach(&b);

        broadcast(&mut probe).unwrap();

        assert_eq!(probe.log, vec!["a", "nest", "a", "b", "b"]);
    }

    #[test]
    fn subscriber_detached_mid_broadcast_still_sees_current_broadcast() {
        let victim = handle(Label("victim"));
        let detacher = handle(Detacher {
            victim: Rc::clone(&victim),
        });
        let mut probe = Probe::default();
        probe.registry.attach(&detacher);
        probe.registry.attach(&victim);

        broadcast(&mut probe).unwrap();
        assert_eq!(probe.log, vec!["detach", "victim"]);

        probe.log.clear();
        broadcast(&mut probe).unwrap();
        assert_eq!(probe.log, vec!["detach"]);
    }

    #[test]
    fn subscriber_attached_mid_broadcast_waits_for_the_next_one() {
        let late = handle(Label("late"));
        let attacher = handle(Attacher {
            late: Rc::clone(&late),
        });
        let mut probe = Probe::default();
        probe.registry.attach(&attacher);

        broadcast(&mut probe).unwrap();
        assert_eq!(probe.log, vec!["attach"]);
        assert!(probe.registry.contains(&late));

        probe.log.clear();
        broadcast(&mut probe).unwrap();
        assert_eq!(probe.log, vec!["attach", "late"]);
    }

    #[test]
    fn failing_subscriber_stops_the_broadcast() {
        let failing = handle(Failing);
        let after = handle(Label("after"));
        let mut probe = Probe::default();
        probe.registry.attach(&failing);
        probe.registry.attach(&after);

        let err = broadcast(&mut probe).unwrap_err();

        assert_eq!(err, "boom");
        assert!(probe.log.is_empty());
    }

    #[test]
    fn dropped_subscribers_are_skipped_and_pruned() {
        let keep = handle(Label("keep"));
        let mut probe = Probe::default();
        {
            let gone = handle(Label("gone"));
            probe.registry.attach(&gone);
        }
        probe.registry.attach(&keep);

        broadcast(&mut probe).unwrap();

        assert_eq!(probe.log, vec!["keep"]);
        assert_eq!(probe.registry.len(), 1);
        assert_eq!(probe.registry.subscribers.len(), 1);
    }
}
