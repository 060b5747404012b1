use serde::{Deserialize, Serialize};

use crate::{Chain, ChainLink};

/// One record of an expected chain
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestLink {
    pub digest: String,
    pub left: bool,
}

impl TestLink {
    /// Convert to a chain link
    pub fn to_link(&self) -> Result<ChainLink<32>, Box<dyn std::error::Error>> {
        Ok(ChainLink::new(decode_digest(&self.digest)?, self.left))
    }
}

/// Expected chain for one leaf
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestChain {
    pub index: usize,
    pub links: Vec<TestLink>,
}

impl TestChain {
    /// Convert to a chain
    pub fn to_chain(&self) -> Result<Chain<32>, Box<dyn std::error::Error>> {
        let links = self
            .links
            .iter()
            .map(TestLink::to_link)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Chain::new(links))
    }
}

/// A leaf sequence and everything expected from it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestCase {
    pub comment: Option<String>,
    pub data: Vec<String>,
    pub root: String,
    pub chains: Vec<TestChain>,
}

impl TestCase {
    /// Get the expected root as bytes
    pub fn root_as_bytes(&self) -> Result<[u8; 32], Box<dyn std::error::Error>> {
        decode_digest(&self.root)
    }
}

/// Root structure for the test data files
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestVectors {
    pub cases: Vec<TestCase>,
}

impl TestVectors {
    /// Load test vectors from a JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

fn decode_digest(digest: &str) -> Result<[u8; 32], Box<dyn std::error::Error>> {
    hex::decode(digest)?
        .try_into()
        .map_err(|bytes: Vec<u8>| format!("expected 32 bytes, got {}", bytes.len()).into())
}
