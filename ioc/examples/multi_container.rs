use keyed_ioc::{global, Container, Instance, InstanceStore, Options};
use std::sync::Arc;

// A function that configures dependencies and runs some logic.
// By accepting a `&Container`, it can be tested with a controlled environment.
fn process_data(container: &Container) -> String {
  // Register a data source ONLY within the scope of this container.
  container
    .register(
      "data",
      |_| Ok(Arc::new("test data".to_string()) as Instance),
      Options::new(),
    )
    .unwrap();

  // Resolve the dependency from the provided container.
  let data = container
    .resolve::<String>("data")
    .expect("Data not found in container");
  format!("Processed: {}", data.to_uppercase())
}

fn main() {
  // --- Test Scenario with a Local Container ---
  println!("--- Running with a local container ---");
  let test_container = Container::new();
  let result = process_data(&test_container);

  println!("Result: {}", result);
  assert_eq!(result, "Processed: TEST DATA");

  // --- Verify Isolation ---
  // The service registered in `test_container` should NOT exist in the global container.
  assert!(
    global().create("data").is_err(),
    "Dependency should not have leaked into the global container!"
  );
  println!("\nVerified that the local container is isolated from the global one.");

  // --- A Container Resolved From The Global One ---
  // Offer another store under the "instanceStore" interface and prefer it.
  let store = Arc::new(InstanceStore::new());
  let provided = Arc::clone(&store);
  global()
    .register(
      "ScratchStore",
      move |_| Ok(Arc::clone(&provided) as Instance),
      Options::new().interface(Container::STORE_INTERFACE),
    )
    .unwrap();
  global().add_selector(Container::STORE_INTERFACE, |candidates| {
    Ok(
      candidates
        .into_iter()
        .filter(|c| c.key == "ScratchStore")
        .collect(),
    )
  });

  let scratch = global()
    .resolve::<Container>("Container")
    .expect("a container backed by the scratch store");
  let result = process_data(&scratch);
  assert_eq!(result, "Processed: TEST DATA");
  println!("Scratch store now holds: {:?}", store.keys());
}
