use keyed_ioc::{global, resolve, Component, Instance, Options};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};

// A simple service that gets a unique ID upon creation.
struct RequestTracker {
  id: usize,
}
impl Component for RequestTracker {}

// A global, thread-safe counter to generate unique IDs.
static ID_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn tracker() -> Instance {
  Arc::new(RequestTracker {
    id: ID_COUNTER.fetch_add(1, Ordering::SeqCst),
  })
}

fn main() {
  // --- Singleton Registration ---
  // This factory will only be called ONCE.
  global()
    .register(
      "singleton_tracker",
      |_| {
        println!("Creating SINGLETON RequestTracker...");
        Ok(tracker())
      },
      Options::new().singleton(),
    )
    .unwrap();

  // --- Transient Registration ---
  // This factory will be called EVERY time the service is resolved.
  global()
    .register(
      "transient_tracker",
      |_| {
        println!("Creating TRANSIENT RequestTracker...");
        Ok(tracker())
      },
      Options::new(),
    )
    .unwrap();

  // --- Indexed Collection ---
  // Every instance is created fresh and also kept by the container.
  global()
    .register("mapped_tracker", |_| Ok(tracker()), Options::new().map_instances())
    .unwrap();

  println!("--- Resolving Singletons ---");
  let s1 = resolve!("singleton_tracker" => RequestTracker);
  let s2 = resolve!("singleton_tracker" => RequestTracker);
  println!("Singleton 1 ID: {}, Singleton 2 ID: {}", s1.id, s2.id);
  assert_eq!(s1.id, 0);
  assert_eq!(s2.id, 0);
  assert!(
    Arc::ptr_eq(&s1, &s2),
    "Singleton instances should be identical"
  );
  println!("Singleton instances are the same pointer, as expected.\n");

  println!("--- Resolving Transients ---");
  let t1 = resolve!("transient_tracker" => RequestTracker);
  let t2 = resolve!("transient_tracker" => RequestTracker);
  println!("Transient 1 ID: {}, Transient 2 ID: {}", t1.id, t2.id);
  assert_eq!(t1.id, 1);
  assert_eq!(t2.id, 2);
  assert!(
    !Arc::ptr_eq(&t1, &t2),
    "Transient instances should be different"
  );
  assert!(global().all_instances("transient_tracker").is_empty());
  println!("Transient instances are different pointers, as expected.\n");

  println!("--- Resolving Mapped Instances ---");
  for _ in 0..3 {
    resolve!("mapped_tracker");
  }
  let kept = global().all_instances("mapped_tracker");
  println!("The container kept {} mapped trackers.", kept.len());
  assert_eq!(kept.len(), 3);
}
