//! # Keyed IoC
//!
//! A dynamic, string-keyed Inversion of Control (IoC) container for Rust.
//!
//! Services are registered as factories under unique string keys. Each
//! registration carries a policy that decides how many instances live
//! (transient, singleton or an indexed collection), which capabilities
//! ("interfaces") it satisfies, and which dependencies it needs injected.
//!
//! ## Core Concepts
//!
//! - **Container**: registers factories and resolves instances. Every
//!   container registers itself, so new containers can be resolved from an
//!   existing one.
//! - **Instance Store**: the table behind a container. The global container
//!   uses the process-wide store; `reset` restores it.
//! - **Interfaces**: tags shared by several registrations, resolved through a
//!   chain of selectors that narrow the candidates to one.
//! - **Injections**: dependencies resolved by key or by interface, delivered
//!   either as the first factory argument (constructor injection) or through
//!   [`Component::inject`] after construction (property injection).
//!
//! ## Quick Start
//!
//! ```
//! use keyed_ioc::{downcast, Component, Container, Error, Injection, Instance, Options};
//! use std::sync::Arc;
//!
//! struct Namer;
//! impl Component for Namer {}
//!
//! #[derive(Default)]
//! struct Greeter {
//!   namer: Option<Arc<Namer>>,
//! }
//!
//! impl Component for Greeter {
//!   fn inject(&mut self, property: &str, instance: Instance) -> Result<(), Error> {
//!     if property == "namer" {
//!       self.namer = downcast(&instance);
//!     }
//!     Ok(())
//!   }
//! }
//!
//! let container = Container::new();
//! container
//!   .register("Namer", |_| Ok(Arc::new(Namer) as Instance), Options::new().singleton())
//!   .unwrap();
//! container
//!   .register(
//!     "Greeter",
//!     |_| Ok(Arc::new(Greeter::default()) as Instance),
//!     Options::new().inject("namer", Injection::key("Namer")),
//!   )
//!   .unwrap();
//!
//! let greeter = container.resolve::<Greeter>("Greeter").unwrap();
//! assert!(greeter.namer.is_some());
//! ```

mod args;
mod component;
mod config;
mod container;
mod core;
mod error;
mod global;
mod macros;
mod options;
mod resolver;
mod selector;
mod store;

pub use args::{Args, Injections};
pub use component::{downcast, downcast_ref, AsAny, Component, Instance, Value};
pub use config::ContainerConfig;
pub use container::{type_key, Constructible, Container};
pub use error::{BoxError, Error, Result};
pub use global::global;
pub use options::{Injection, Interface, Options, Target};
pub use selector::{Candidate, Selector};
pub use store::InstanceStore;
