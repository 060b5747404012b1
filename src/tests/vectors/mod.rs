use std::fs;
use std::path::PathBuf;

mod types;
use crate::{tests::vectors::types::TestVectors, BigTree, Tree};
use sha2::Sha256;

fn run_test_vectors(test_vectors: &TestVectors) {
    for case in &test_vectors.cases {
        let comment = case.comment.as_deref().unwrap_or("unnamed test");
        println!("Running test case: {}", comment);
        let expected_root = case.root_as_bytes().unwrap();

        // bulk build, one-by-one append and the bounded tree must agree
        let built = Tree::<32, Sha256>::from_data(&case.data).unwrap();
        let mut appended = Tree::<32, Sha256>::new();
        let mut bounded = BigTree::<32, Sha256>::new(2);
        let mut detailed = BigTree::<32, Sha256>::new(32);
        for item in &case.data {
            appended.append_data(item);
            bounded.append_data(item).unwrap();
            detailed.append_data(item).unwrap();
        }
        assert_eq!(built.root(), Some(expected_root));
        assert_eq!(appended.root(), Some(expected_root));
        assert_eq!(bounded.root(), Some(expected_root));
        assert_eq!(detailed.root(), Some(expected_root));

        println!("chains");
        for expected in &case.chains {
            let chain = expected.to_chain().unwrap();
            assert!(chain.verify::<Sha256>(&expected_root));
            assert_eq!(built.chain(expected.index).unwrap(), chain);
            assert_eq!(appended.chain(expected.index).unwrap(), chain);
            assert_eq!(detailed.chain(expected.index as u64).unwrap(), chain);
        }
    }
}

#[test]
fn test_sha256_roots() {
    let path = PathBuf::from("src/tests/vectors/testdata/sha256_roots.json");
    let json = fs::read_to_string(&path).unwrap();
    let test_vectors = TestVectors::from_json(&json).unwrap();
    assert!(!test_vectors.cases.is_empty());
    run_test_vectors(&test_vectors);
}
