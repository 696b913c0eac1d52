use keyed_ioc::{global, resolve, Error};
use std::panic;

fn main() {
  // --- Using the panicking `resolve!` macro ---
  println!("Attempting to resolve a service that was never registered...");

  let result = panic::catch_unwind(|| {
    // This line will panic!
    let _service = resolve!("UnregisteredService");
  });

  assert!(result.is_err(), "resolve! should have panicked.");
  println!("Successfully caught the expected panic from resolve!.");

  // --- Using the fallible `create()` method ---
  println!("\nNow, attempting to resolve using the fallible `create()` method...");

  match global().create("UnregisteredService") {
    Ok(_) => panic!("Should not have found the service!"),
    Err(Error::UnknownKey(key)) => println!("Correctly received UnknownKey for '{}'.", key),
    Err(other) => panic!("Unexpected error: {}", other),
  }
}
