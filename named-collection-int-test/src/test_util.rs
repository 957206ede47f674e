use indexmap::IndexMap;
use named_collection::collection;
use named_collection::collection::Collection;
use named_collection::common::Value;
use named_collection::errors::{CollectionError, CollectionResult};
use std::time::Instant;

/// Runs a test against a freshly built context.
///
/// `before` builds the context, `test` exercises it and `after` inspects the
/// context the test left behind. `after` also runs when the test fails so
/// the failure report includes both errors.
pub fn run_test<T, B, A>(before: B, test: T, after: A)
where
    B: FnOnce() -> CollectionResult<TestContext>,
    T: FnOnce(&mut TestContext) -> CollectionResult<()>,
    A: FnOnce(&TestContext) -> CollectionResult<()>,
{
    let start_time = Instant::now();

    let mut ctx = match before() {
        Ok(ctx) => ctx,
        Err(e) => report_failure("Before run failed", &e),
    };

    let test_result = test(&mut ctx);
    let after_result = after(&ctx);
    log::debug!("Test finished in {:?}", start_time.elapsed());

    match (test_result, after_result) {
        (Ok(_), Ok(_)) => {}
        (Err(e), Ok(_)) => report_failure("Test failed", &e),
        (Ok(_), Err(e)) => report_failure("After run failed", &e),
        (Err(e), Err(after_err)) => {
            eprintln!("After run also failed: {:?}", after_err);
            report_failure("Test failed", &e)
        }
    }
}

fn report_failure(stage: &str, error: &CollectionError) -> ! {
    eprintln!("\n==================== TEST FAILED ====================");
    eprintln!("{}: {}", stage, error);
    eprintln!("Kind: {}", error.kind());
    eprintln!("\n{:?}", error);
    eprintln!("=====================================================\n");
    panic!("{}: {}", stage, error);
}

/// The collection under test together with the state it started from.
#[derive(Clone, Debug)]
pub struct TestContext {
    collection: Collection,
    pristine: Collection,
}

impl TestContext {
    pub fn new(collection: Collection) -> Self {
        let pristine = collection.copy();
        Self {
            collection,
            pristine,
        }
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn collection_mut(&mut self) -> &mut Collection {
        &mut self.collection
    }

    pub fn pristine(&self) -> &Collection {
        &self.pristine
    }
}

/// A small service configuration tree mixing keyed and unkeyed slots.
///
/// ```text
/// {name: "inventory", version: 3,
///  server: {host: "localhost", port: 8080, tls: {enabled: false}},
///  "primary", "replica",
///  limits: {cpu: 2, memory: 512}}
/// ```
pub fn create_config_fixture() -> Collection {
    collection![
        "name" => "inventory",
        "version" => 3,
        "server" => collection![
            "host" => "localhost",
            "port" => 8080,
            "tls" => collection!["enabled" => false],
        ],
        "primary",
        "replica",
        "limits" => collection!["cpu" => 2, "memory" => 512],
    ]
}

/// An unkeyed list of `count` integers starting at zero.
pub fn create_sequence_fixture(count: i32) -> Collection {
    let mut collection = Collection::empty();
    for i in 0..count {
        collection.append(i);
    }
    collection
}

pub fn create_test_context() -> CollectionResult<TestContext> {
    Ok(TestContext::new(create_config_fixture()))
}

pub fn create_sequence_context() -> CollectionResult<TestContext> {
    Ok(TestContext::new(create_sequence_fixture(10)))
}

/// Fails unless the test left the collection exactly as it was built.
pub fn assert_untouched(ctx: &TestContext) -> CollectionResult<()> {
    assert_eq!(ctx.collection(), ctx.pristine(), "collection was modified");
    Ok(())
}

pub fn no_check(_: &TestContext) -> CollectionResult<()> {
    Ok(())
}

pub fn mapping_of<const N: usize>(entries: [(&str, Value); N]) -> IndexMap<String, Value> {
    entries
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}
