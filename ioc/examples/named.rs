use keyed_ioc::{global, resolve, Component, Instance, Options};
use std::sync::{Arc, Mutex};

// --- Abstraction and Implementations ---
trait MessageSender: Send + Sync {
  fn send(&self, to: &str, message: &str) -> String;
}

struct EmailSender;
impl MessageSender for EmailSender {
  fn send(&self, to: &str, message: &str) -> String {
    format!("Sending email to {}: '{}'", to, message)
  }
}

struct SmsSender;
impl MessageSender for SmsSender {
  fn send(&self, to: &str, message: &str) -> String {
    format!("Sending SMS to {}: '{}'", to, message)
  }
}

struct Sender(Box<dyn MessageSender>);
impl Component for Sender {}

fn main() {
  // --- Registration ---
  // Both implementations satisfy the "sender" interface.
  global()
    .register(
      "email",
      |_| Ok(Arc::new(Sender(Box::new(EmailSender))) as Instance),
      Options::new().interface("sender").attribute("channel", "email"),
    )
    .unwrap();
  global()
    .register(
      "sms",
      |_| Ok(Arc::new(Sender(Box::new(SmsSender))) as Instance),
      Options::new().interface("sender").attribute("channel", "sms"),
    )
    .unwrap();

  // --- Selection ---
  // A selector picks the implementation. It runs on every lookup, so changing
  // the preference changes what the interface resolves to.
  let preferred = Arc::new(Mutex::new("email"));
  let current = Arc::clone(&preferred);
  global().add_selector("sender", move |candidates| {
    let channel = *current.lock().unwrap();
    Ok(
      candidates
        .into_iter()
        .filter(|c| c.options.attribute_value("channel") == Some(channel))
        .collect(),
    )
  });

  // --- Resolution ---
  let email_notifier = resolve!(interface "sender" => Sender);
  *preferred.lock().unwrap() = "sms";
  let sms_notifier = resolve!(interface "sender" => Sender);

  let result1 = email_notifier.0.send("test@example.com", "Hello from keyed_ioc!");
  let result2 = sms_notifier.0.send("+123456789", "Hello from keyed_ioc!");

  println!("{}", result1);
  println!("{}", result2);

  assert!(result1.contains("email"));
  assert!(result2.contains("SMS"));
}
