use keyed_ioc::{downcast, global, resolve, Component, Error, Injection, Instance, Options};
use std::sync::Arc;

// 1. Define the abstraction (the trait)
trait Logger: Send + Sync {
  fn log(&self, message: &str);
}

// 2. Define a concrete implementation
struct ConsoleLogger;
impl Logger for ConsoleLogger {
  fn log(&self, message: &str) {
    println!("[CONSOLE LOG]: {}", message);
  }
}

// The container hands out components, so the trait object travels in a handle.
struct LoggerHandle(Arc<dyn Logger>);
impl Component for LoggerHandle {}

// 3. Define a service that depends on the "logger" interface
#[derive(Default)]
struct ReportService {
  logger: Option<Arc<LoggerHandle>>,
}

impl ReportService {
  fn generate_report(&self) {
    let logger = &self.logger.as_ref().expect("logger injected").0;
    logger.log("Starting report generation.");
    // ... logic to generate report ...
    logger.log("Finished report generation.");
  }
}

impl Component for ReportService {
  fn inject(&mut self, property: &str, instance: Instance) -> Result<(), Error> {
    match property {
      "logger" => {
        self.logger = downcast(&instance);
        Ok(())
      }
      _ => Err(Error::UnknownProperty {
        type_name: std::any::type_name::<Self>(),
        property: property.to_owned(),
      }),
    }
  }
}

fn main() {
  // --- Registration ---

  // Register the console logger as one implementation of the "logger" interface.
  global()
    .register(
      "ConsoleLogger",
      |_| Ok(Arc::new(LoggerHandle(Arc::new(ConsoleLogger))) as Instance),
      Options::new().interface("logger").singleton(),
    )
    .unwrap();

  // Register the ReportService. It only names the interface it needs; the
  // container finds an implementation and injects it after construction.
  global()
    .register(
      "ReportService",
      |_| Ok(Arc::new(ReportService::default()) as Instance),
      Options::new().inject("logger", Injection::interface("logger")),
    )
    .unwrap();

  // --- Resolution and Usage ---
  println!("Resolving the high-level service...");
  let report_service = resolve!("ReportService" => ReportService);

  println!("Using the service...");
  report_service.generate_report();
}
