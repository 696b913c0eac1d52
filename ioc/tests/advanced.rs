use keyed_ioc::{
  args, downcast, downcast_ref, Args, BoxError, Component, Constructible, Container,
  ContainerConfig, Error, Injection, Injections, Instance, InstanceStore, Options,
};
use pretty_assertions::assert_eq;
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};

// --- Advanced Test Fixtures ---

struct ClassW;
impl ClassW {
  fn name(&self) -> &str {
    "ryan"
  }
}
impl Component for ClassW {}
impl Constructible for ClassW {
  fn construct(_args: Args) -> Result<Self, BoxError> {
    Ok(ClassW)
  }
}

struct ClassX;
impl ClassX {
  fn ask(&self) -> &str {
    "how are you"
  }
}
impl Component for ClassX {}
impl Constructible for ClassX {
  fn construct(_args: Args) -> Result<Self, BoxError> {
    Ok(ClassX)
  }
}

// A service whose collaborators are assigned after construction.
#[derive(Default)]
struct ClassV {
  namer: Option<Arc<ClassW>>,
  greeter: Option<Arc<ClassX>>,
}

impl ClassV {
  fn say(&self) -> String {
    let namer = self.namer.as_ref().expect("namer injected");
    let greeter = self.greeter.as_ref().expect("greeter injected");
    format!("hello {}, {}", namer.name(), greeter.ask())
  }
}

impl Component for ClassV {
  fn inject(&mut self, property: &str, instance: Instance) -> Result<(), Error> {
    match property {
      "namer" => self.namer = downcast(&instance),
      "greeter" => self.greeter = downcast(&instance),
      _ => {
        return Err(Error::UnknownProperty {
          type_name: std::any::type_name::<Self>(),
          property: property.to_owned(),
        })
      }
    }
    Ok(())
  }
}

impl Constructible for ClassV {
  fn construct(_args: Args) -> Result<Self, BoxError> {
    Ok(ClassV::default())
  }
}

// A service that takes its collaborators through the constructor aggregate.
struct ClassY {
  injections: Injections,
  second: Option<String>,
  third: Option<String>,
}
impl Component for ClassY {}
impl Constructible for ClassY {
  fn construct(args: Args) -> Result<Self, BoxError> {
    let injections = args.injections().cloned().ok_or("missing injections")?;
    Ok(ClassY {
      injections,
      second: args.get::<&str>(1).map(|s| s.to_string()),
      third: args.get::<&str>(2).map(|s| s.to_string()),
    })
  }
}

struct ClassZ;
impl ClassZ {
  fn meow(&self) -> u32 {
    1
  }
}
impl Component for ClassZ {}

fn unit(_: Args) -> Result<Instance, BoxError> {
  Ok(Arc::new(()))
}

// --- Advanced Tests ---

#[test]
fn test_property_injection_by_key() {
  // Arrange
  let container = Container::new();
  container
    .register_type::<ClassV>(
      Options::new()
        // A bare key becomes a property injection of that key.
        .inject("namer", "ClassW")
        .inject("greeter", Injection::key("ClassX")),
    )
    .unwrap();
  container.register_type::<ClassW>(Options::new()).unwrap();
  container.register_type::<ClassX>(Options::new()).unwrap();

  // Act
  let v = container.resolve::<ClassV>("ClassV").unwrap();

  // Assert
  assert_eq!(v.say(), "hello ryan, how are you");
}

#[test]
fn test_constructor_injection_is_the_first_argument() {
  // Arrange
  let created = Arc::new(AtomicUsize::new(0));
  let counter = Arc::clone(&created);

  let container = Container::new();
  container
    .register_type::<ClassY>(
      Options::new()
        .inject("test", Injection::key("ClassZ").constructor())
        .inject("pest", Injection::key("ClassZ").constructor()),
    )
    .unwrap();
  container
    .register(
      "ClassZ",
      move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(ClassZ) as Instance)
      },
      Options::new(),
    )
    .unwrap();

  // Act
  let y1 = container.resolve::<ClassY>("ClassY").unwrap();

  // Assert
  assert_eq!(y1.injections.len(), 2);
  let test = y1.injections.get_as::<ClassZ>("test").unwrap();
  let pest = y1.injections.get_as::<ClassZ>("pest").unwrap();
  assert_eq!(test.meow(), 1);
  assert_eq!(pest.meow(), 1);
  assert!(!Arc::ptr_eq(&test, &pest));
  assert_eq!(y1.second, None);
  assert_eq!(y1.third, None);
  assert_eq!(created.load(Ordering::SeqCst), 2);

  // Act: extra positional arguments follow the aggregate.
  let y2 = container
    .create_with("ClassY", args!["foo", "bar"])
    .unwrap()
    .unwrap();
  let y2 = downcast_ref::<ClassY>(&y2).unwrap();

  // Assert
  assert_eq!(y2.injections.len(), 2);
  assert_eq!(y2.second.as_deref(), Some("foo"));
  assert_eq!(y2.third.as_deref(), Some("bar"));
  assert_eq!(created.load(Ordering::SeqCst), 4);
  assert!(!Arc::ptr_eq(
    y1.injections.get("test").unwrap(),
    y2.injections.get("test").unwrap()
  ));
}

#[test]
fn test_key_injection_forwards_constructor_args() {
  let container = Container::new();
  container
    .register(
      "echo",
      |args| {
        let word = args.get::<&str>(0).ok_or("missing word")?;
        Ok(Arc::new(word.to_string()) as Instance)
      },
      Options::new(),
    )
    .unwrap();
  container
    .register(
      "holder",
      |args| {
        let echoed = args
          .injections()
          .and_then(|i| i.get_as::<String>("word"))
          .ok_or("missing word")?;
        Ok(Arc::new(format!("holding {}", echoed)) as Instance)
      },
      Options::new().inject(
        "word",
        Injection::key("echo").constructor().with_args(args!["ping"]),
      ),
    )
    .unwrap();

  let holder = container.resolve::<String>("holder").unwrap();
  assert_eq!(*holder, "holding ping");
}

#[test]
fn test_property_injection_by_interface() {
  // Arrange
  #[derive(Default)]
  struct ClassAA {
    test: Option<Arc<ClassBB>>,
  }
  impl Component for ClassAA {
    fn inject(&mut self, property: &str, instance: Instance) -> Result<(), Error> {
      if property == "test" {
        self.test = downcast(&instance);
      }
      Ok(())
    }
  }
  struct ClassBB;
  impl ClassBB {
    fn what(&self) -> &str {
      "footlong"
    }
  }
  impl Component for ClassBB {}

  let container = Container::new();
  container
    .register(
      "ClassAA",
      |_| Ok(Arc::new(ClassAA::default()) as Instance),
      Options::new().inject("test", Injection::interface("hotdog")),
    )
    .unwrap();
  container
    .register(
      "ClassBB",
      |_| Ok(Arc::new(ClassBB) as Instance),
      Options::new().interface("hotdog"),
    )
    .unwrap();

  // Act
  let aa = container.resolve::<ClassAA>("ClassAA").unwrap();

  // Assert
  assert_eq!(aa.test.as_ref().unwrap().what(), "footlong");
}

#[test]
fn test_injection_without_a_candidate_fails() {
  let container = Container::new();
  container
    .register(
      "lonely",
      unit,
      Options::new().inject("friend", Injection::interface("nobody_implements_this")),
    )
    .unwrap();

  let err = container.create("lonely").unwrap_err();
  assert!(matches!(
    err,
    Error::UnresolvedInjection { ref key, ref property } if key == "lonely" && property == "friend"
  ));
}

#[test]
fn test_property_injection_into_a_type_without_the_property_fails() {
  let container = Container::new();
  container.register("dep", unit, Options::new()).unwrap();
  container
    .register("plain", unit, Options::new().inject("dep", "dep").singleton())
    .unwrap();

  let err = container.create("plain").unwrap_err();
  assert!(matches!(err, Error::UnknownProperty { ref property, .. } if property == "dep"));
  assert!(container.all_instances("plain").is_empty());
}

#[test]
fn test_property_injection_into_a_shared_instance_fails() {
  let shared: Instance = Arc::new(ClassV::default());
  let handed_out = Arc::clone(&shared);

  let container = Container::new();
  container.register_type::<ClassW>(Options::new()).unwrap();
  container
    .register(
      "shared",
      move |_| Ok(Arc::clone(&handed_out)),
      Options::new().inject("namer", "ClassW"),
    )
    .unwrap();

  let err = container.create("shared").unwrap_err();
  assert!(matches!(err, Error::SharedInstance { ref property, .. } if property == "namer"));
}

#[test]
fn test_failed_resolution_keeps_nested_side_effects() {
  // Arrange: a singleton dependency that resolves fine, and a consumer whose
  // own factory fails afterwards.
  let container = Container::new();
  container
    .register("dependency", unit, Options::new().singleton())
    .unwrap();
  container
    .register(
      "consumer",
      |_| Err("consumer exploded".into()),
      Options::new()
        .singleton()
        .inject("dependency", Injection::key("dependency").constructor()),
    )
    .unwrap();

  // Act
  let err = container.create("consumer").unwrap_err();

  // Assert
  assert!(matches!(err, Error::Factory { ref key, .. } if key == "consumer"));
  // The consumer recorded nothing...
  assert!(container.all_instances("consumer").is_empty());
  // ...but the dependency's singleton stays cached.
  assert_eq!(container.all_instances("dependency").len(), 1);
}

#[test]
fn test_nested_errors_propagate_unchanged() {
  let container = Container::new();
  container
    .register("inner", |_| Err("inner exploded".into()), Options::new())
    .unwrap();
  container
    .register("outer", unit, Options::new().inject("inner", Injection::key("inner").constructor()))
    .unwrap();

  let err = container.create("outer").unwrap_err();
  match err {
    Error::Factory { key, source } => {
      assert_eq!(key, "inner");
      assert_eq!(source.to_string(), "inner exploded");
    }
    other => panic!("unexpected error: {other}"),
  }
}

#[test]
fn test_singleton_dependency_is_resolved_once() {
  let created = Arc::new(AtomicUsize::new(0));
  let counter = Arc::clone(&created);

  let container = Container::new();
  container
    .register(
      "shared_dependency",
      move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(Arc::new(ClassZ) as Instance)
      },
      Options::new().singleton(),
    )
    .unwrap();
  container
    .register_type::<ClassY>(
      Options::new()
        .inject("a", Injection::key("shared_dependency").constructor())
        .inject("b", Injection::key("shared_dependency").constructor()),
    )
    .unwrap();

  let y = container.resolve::<ClassY>("ClassY").unwrap();
  assert!(Arc::ptr_eq(
    y.injections.get("a").unwrap(),
    y.injections.get("b").unwrap()
  ));
  assert_eq!(created.load(Ordering::SeqCst), 1);
}

#[test]
fn test_cycle_detection_reports_the_path() {
  // Arrange
  let container = Container::with_config(ContainerConfig {
    detect_cycles: true,
    ..ContainerConfig::default()
  });
  container
    .register("A", unit, Options::new().inject("b", Injection::key("B").constructor()))
    .unwrap();
  container
    .register("B", unit, Options::new().inject("a", Injection::key("A").constructor()))
    .unwrap();

  // Act & Assert
  for _ in 0..2 {
    match container.create("A").unwrap_err() {
      Error::CyclicDependency { path } => assert_eq!(path, vec!["A", "B", "A"]),
      other => panic!("unexpected error: {other}"),
    }
  }
}

#[test]
fn test_cycle_detection_allows_shared_dependencies() {
  // A diamond: top -> left -> bottom, top -> right -> bottom.
  let container = Container::with_config(ContainerConfig {
    detect_cycles: true,
    ..ContainerConfig::default()
  });
  container.register("bottom", unit, Options::new()).unwrap();
  for side in ["left", "right"] {
    container
      .register(
        side,
        unit,
        Options::new().inject("bottom", Injection::key("bottom").constructor()),
      )
      .unwrap();
  }
  container
    .register(
      "top",
      unit,
      Options::new()
        .inject("left", Injection::key("left").constructor())
        .inject("right", Injection::key("right").constructor()),
    )
    .unwrap();

  assert!(container.create("top").unwrap().is_some());
}

#[test]
fn test_container_resolves_a_new_container_over_a_custom_store() {
  // Arrange
  struct ClassCC;
  impl Component for ClassCC {}
  impl Constructible for ClassCC {
    fn construct(_args: Args) -> Result<Self, BoxError> {
      Ok(ClassCC)
    }
  }

  let container = Container::with_config(ContainerConfig {
    detect_cycles: true,
    ..ContainerConfig::default()
  });
  let custom = Arc::new(InstanceStore::new());
  let provided = Arc::clone(&custom);
  container
    .register(
      "MyCustomStore",
      move |_| Ok(Arc::clone(&provided) as Instance),
      Options::new().interface(Container::STORE_INTERFACE),
    )
    .unwrap();
  container.add_selector(Container::STORE_INTERFACE, |candidates| {
    Ok(
      candidates
        .into_iter()
        .filter(|c| c.key == "MyCustomStore")
        .collect(),
    )
  });

  // Act
  let nested = container.resolve::<Container>("Container").unwrap();

  // Assert
  assert!(Arc::ptr_eq(nested.store(), &custom));
  assert!(!Arc::ptr_eq(nested.store(), container.store()));
  assert!(nested.config().detect_cycles);
  assert_eq!(
    custom.keys(),
    vec!["Container", "DefaultInstanceStore", "instanceStore"]
  );

  nested.register_type::<ClassCC>(Options::new()).unwrap();
  assert_eq!(custom.len(), 4);
  assert!(!container.store().contains("ClassCC"));
}

#[test]
fn test_container_over_its_own_store_is_rejected() {
  // Without a selector the default provider hands out the parent's own store,
  // where the bootstrap keys already exist.
  let container = Container::new();

  match container.create("Container").unwrap_err() {
    Error::Factory { key, source } => {
      assert_eq!(key, "Container");
      assert_eq!(
        source.to_string(),
        Error::DuplicateKey("Container".to_owned()).to_string()
      );
    }
    other => panic!("unexpected error: {other}"),
  }
}

#[test]
fn test_with_store_shares_registrations() {
  let store = Arc::new(InstanceStore::new());
  let first = Container::with_store(Arc::clone(&store)).unwrap();
  first.register("shared_key", unit, Options::new()).unwrap();

  assert!(matches!(
    Container::with_store(Arc::clone(&store)).unwrap_err(),
    Error::DuplicateKey(_)
  ));
  assert!(store.contains("shared_key"));
}
