//! End-to-end: draft files through the service into a memory sink.

use std::fs;

use catalog_adapters::{DraftLoader, MemorySink, SequentialIdGenerator};
use catalog_core::{
    application::ports::{DraftSource, IdGenerator},
    prelude::*,
};
use tempfile::TempDir;

const BATCH: &str = r#"
[[drafts]]
id = "b12fcc08-b480-46da-9373-10a91a045627"
name = "Product One"
description = "Description for Product One"
price = 11.99
imageURL = "one.jpg"
quantity = 5

  [[drafts.colors]]
  id = "f7d83629-2b86-4250-b22e-db879ec2c2c7"
  color = "Yellow"
  price = 11.99
  imageURL = "yellow.jpg"
  quantity = 101

[[drafts]]
name = "Bad"
description = "Too short"
price = -4
imageURL = "bad.psd"
quantity = 1
"#;

#[test]
fn batch_file_is_split_into_accepted_and_rejected() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("batch.toml");
    fs::write(&path, BATCH).unwrap();

    let sink = MemorySink::new();
    let service = CreateProductService::new(
        Box::new(SequentialIdGenerator::new(42)),
        Box::new(sink.clone()),
    );

    let drafts = DraftLoader::new().load(&path).unwrap();
    assert_eq!(drafts.len(), 2);

    let outcomes: Vec<_> = drafts
        .into_iter()
        .map(|d| service.submit(d.input).unwrap())
        .collect();

    assert!(outcomes[0].is_accepted());
    let SubmitOutcome::Rejected { errors, .. } = &outcomes[1] else {
        panic!("second draft must be rejected");
    };
    let paths: Vec<_> = errors.paths().map(|p| p.as_str()).collect();
    assert_eq!(paths, ["description", "id", "imageURL", "name", "price"]);
    assert_eq!(errors.get("id").unwrap().kind, ErrorKind::RequiredMissing);

    let stored = sink.list().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].product.colors[0].quantity, 101);
}

#[test]
fn seeded_runs_assign_identical_ids() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("batch.toml");
    fs::write(&path, BATCH).unwrap();

    let run = || {
        let service = CreateProductService::new(
            Box::new(SequentialIdGenerator::new(7)),
            Box::new(MemorySink::new()),
        );
        let draft = DraftLoader::new().load(&path).unwrap().remove(0);
        service.submit(draft.input).unwrap().into_result().unwrap()
    };

    let (a, b) = (run(), run());
    assert_eq!(a.id, b.id);
    assert_eq!(a.colors[0].id, b.colors[0].id);
    assert_eq!(a.id, SequentialIdGenerator::new(7).generate());
}
