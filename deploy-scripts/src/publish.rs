//! Publishing of deployed contract sources for independent verification.
//!
//! Two mutually exclusive backends implement one capability interface:
//! a local registry service for development networks, and a public
//! block-explorer verification API for everything else. The backend is
//! selected once at startup from the network tag.
//!
//! Publishing is post-processing relative to the deployment's on-chain
//! effects: individual failures are logged with their cause and never
//! abort the run or their sibling publications.

use std::time::Duration;

use ethers::{
    abi::{encode, Token},
    types::{Address, Bytes},
};
use futures::future::join_all;
use serde_json::Value;
use tracing::{error, info};

use crate::{
    artifacts::Artifacts,
    constants::PUBLISH_TIMEOUT_SECS,
    context::ExecutionContext,
    errors::ScriptError,
    plan::{deployment_plan, resolve_args},
};

/// Everything needed to reproduce the exact artifact that was deployed.
///
/// The constructor arguments are the final ones used in the deploy call,
/// not re-derived from configuration.
#[derive(Clone, Debug)]
pub struct PublicationRecord {
    /// The contract's symbolic name
    pub name: String,
    /// The deployed address
    pub address: Address,
    /// The flattened source text
    pub source: String,
    /// The deployment bytecode
    pub bytecode: Bytes,
    /// The constructor argument tokens used in the deploy call
    pub constructor_args: Vec<Token>,
}

/// A verification-publishing backend
#[allow(async_fn_in_trait)]
pub trait VerificationBackend {
    /// Publish one contract's record; a failure affects only this record
    async fn publish(&self, record: &PublicationRecord) -> Result<(), ScriptError>;
}

/// Build the publication records for all four plan contracts.
///
/// Requires every address in the context to be populated, either freshly
/// deployed in this run or supplied as an override. For targets deployed in
/// this run, the recorded final constructor arguments are used verbatim;
/// for override-only targets the arguments are resolved once from the plan.
pub fn build_publication_records(
    artifacts: &Artifacts,
    ctx: &ExecutionContext,
) -> Result<Vec<PublicationRecord>, ScriptError> {
    deployment_plan()
        .iter()
        .map(|step| {
            let address = ctx.require_address(step.target)?;
            let constructor_args = match ctx.final_args(step.target) {
                Some(args) => args.to_vec(),
                None => resolve_args(step.args, ctx)?,
            };
            let artifact = artifacts.for_target(step.target);

            Ok(PublicationRecord {
                name: artifact.name.clone(),
                address,
                source: artifact.source.clone(),
                bytecode: artifact.bytecode.clone(),
                constructor_args,
            })
        })
        .collect()
}

/// Publish all records concurrently on the given backend.
///
/// The four publications are independent, so they are issued as a joint
/// fan-out and awaited together; a failing record does not cancel its
/// siblings. Each outcome is logged, and the per-record results are
/// returned for inspection.
pub async fn publish_records<B: VerificationBackend>(
    backend: &B,
    records: &[PublicationRecord],
) -> Vec<Result<(), ScriptError>> {
    let results = join_all(records.iter().map(|record| backend.publish(record))).await;

    for (record, result) in records.iter().zip(results.iter()) {
        match result {
            Ok(()) => info!("{} source published for {:#x}", record.name, record.address),
            Err(e) => error!("Failed to publish {}: {}", record.name, e),
        }
    }

    results
}

/// Build the HTTP client shared by a backend
fn http_client() -> Result<reqwest::Client, ScriptError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(PUBLISH_TIMEOUT_SECS))
        .build()
        .map_err(|e| ScriptError::Publication(e.to_string()))
}

/// The local development registry backend.
///
/// Posts the contract name, address, and bytecode to a local registry
/// service so locally deployed contracts show up in the dev block explorer.
pub struct TesseractsBackend {
    /// The HTTP client used for registry requests
    client: reqwest::Client,
    /// The base URL of the registry service
    base_url: String,
}

impl TesseractsBackend {
    /// Create a backend posting to the given registry URL
    pub fn new(base_url: &str) -> Result<Self, ScriptError> {
        Ok(Self {
            client: http_client()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl VerificationBackend for TesseractsBackend {
    async fn publish(&self, record: &PublicationRecord) -> Result<(), ScriptError> {
        let url = format!("{}/contracts", self.base_url);
        let body = serde_json::json!({
            "name": record.name,
            "address": format!("{:#x}", record.address),
            "bytecode": format!("0x{}", hex::encode(&record.bytecode)),
        });

        self.client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ScriptError::Publication(e.to_string()))?
            .error_for_status()
            .map_err(|e| ScriptError::Publication(e.to_string()))?;

        Ok(())
    }
}

/// The public block-explorer verification backend.
///
/// Posts the contract's name, address, flattened source, bytecode, and
/// ABI-encoded constructor arguments to the explorer's verify-source-code
/// API. The explorer signals rejection in the response body, not just the
/// HTTP status, so both are checked.
pub struct EtherscanBackend {
    /// The HTTP client used for verification requests
    client: reqwest::Client,
    /// The explorer API endpoint
    api_url: String,
    /// The explorer API key
    api_key: String,
}

impl EtherscanBackend {
    /// Create a backend posting to the given explorer API
    pub fn new(api_url: &str, api_key: &str) -> Result<Self, ScriptError> {
        Ok(Self {
            client: http_client()?,
            api_url: api_url.to_string(),
            api_key: api_key.to_string(),
        })
    }
}

impl VerificationBackend for EtherscanBackend {
    async fn publish(&self, record: &PublicationRecord) -> Result<(), ScriptError> {
        let constructor_args = hex::encode(encode(&record.constructor_args));
        let form = [
            ("apikey", self.api_key.clone()),
            ("module", "contract".to_string()),
            ("action", "verifysourcecode".to_string()),
            ("contractname", record.name.clone()),
            ("contractaddress", format!("{:#x}", record.address)),
            ("sourceCode", record.source.clone()),
            ("bytecode", format!("0x{}", hex::encode(&record.bytecode))),
            ("constructorArguements", constructor_args),
        ];

        let response: Value = self
            .client
            .post(&self.api_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| ScriptError::Publication(e.to_string()))?
            .error_for_status()
            .map_err(|e| ScriptError::Publication(e.to_string()))?
            .json()
            .await
            .map_err(|e| ScriptError::Publication(e.to_string()))?;

        if response.get("status").and_then(Value::as_str) != Some("1") {
            let reason = response
                .get("result")
                .and_then(Value::as_str)
                .unwrap_or("unknown rejection");
            return Err(ScriptError::Publication(reason.to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use ethers::{abi::Abi, types::H256};

    use super::*;
    use crate::types::{Network, Target};

    /// A backend that records publications and fails for one named contract
    struct MockBackend {
        /// The contract name whose publication should fail
        fail_for: Option<&'static str>,
        /// Names of the records that reached the backend
        published: RefCell<Vec<String>>,
    }

    impl VerificationBackend for MockBackend {
        async fn publish(&self, record: &PublicationRecord) -> Result<(), ScriptError> {
            self.published.borrow_mut().push(record.name.clone());
            if self.fail_for == Some(record.name.as_str()) {
                return Err(ScriptError::Publication("backend unavailable".to_string()));
            }
            Ok(())
        }
    }

    /// An artifact with the given name and empty contents
    fn artifact(name: &str) -> crate::artifacts::ContractArtifact {
        crate::artifacts::ContractArtifact {
            name: name.to_string(),
            abi: Abi::default(),
            bytecode: Bytes::from(vec![0x60, 0x80]),
            source: String::new(),
        }
    }

    /// Artifacts for all five contracts
    fn artifacts() -> Artifacts {
        Artifacts {
            governance: artifact("Governance"),
            priority_queue: artifact("PriorityQueue"),
            verifier: artifact("Verifier"),
            rollup: artifact("Rollup"),
            test_token: artifact("TestERC20"),
        }
    }

    /// A context with all four addresses supplied as overrides
    fn complete_context() -> ExecutionContext {
        let mut ctx = ExecutionContext::new(
            Network::Localhost,
            Address::from_low_u64_be(1),
            Address::from_low_u64_be(2),
            Address::from_low_u64_be(3),
            H256::zero(),
        );
        for (i, target) in Target::ALL.into_iter().enumerate() {
            ctx.set_override(target, Address::from_low_u64_be(100 + i as u64));
        }
        ctx
    }

    /// One failing publication leaves the other three outcomes unaffected
    #[tokio::test]
    async fn single_failure_does_not_affect_siblings() {
        let backend = MockBackend {
            fail_for: Some("Verifier"),
            published: RefCell::new(Vec::new()),
        };
        let records = build_publication_records(&artifacts(), &complete_context()).unwrap();

        let results = publish_records(&backend, &records).await;

        assert_eq!(results.len(), 4);
        for (record, result) in records.iter().zip(results.iter()) {
            if record.name == "Verifier" {
                assert!(result.is_err());
            } else {
                assert!(result.is_ok());
            }
        }
        // All four publications were attempted despite the failure
        assert_eq!(backend.published.borrow().len(), 4);
    }

    /// Records cannot be built unless every address is populated
    #[test]
    fn records_require_all_addresses() {
        let mut ctx = ExecutionContext::new(
            Network::Localhost,
            Address::from_low_u64_be(1),
            Address::from_low_u64_be(2),
            Address::from_low_u64_be(3),
            H256::zero(),
        );
        // Leave the rollup address out
        ctx.set_override(Target::Governance, Address::from_low_u64_be(100));
        ctx.set_override(Target::PriorityQueue, Address::from_low_u64_be(101));
        ctx.set_override(Target::Verifier, Address::from_low_u64_be(102));

        let err = build_publication_records(&artifacts(), &ctx).unwrap_err();
        assert!(matches!(err, ScriptError::MissingAddress(_)));
    }

    /// Arguments recorded at deploy time take precedence over re-resolution
    #[test]
    fn recorded_deploy_args_are_used_verbatim() {
        let mut ctx = complete_context();
        let frozen = vec![Token::Address(Address::from_low_u64_be(999))];
        ctx.record_deployment(
            Target::Governance,
            Address::from_low_u64_be(100),
            frozen.clone(),
        );

        let records = build_publication_records(&artifacts(), &ctx).unwrap();
        assert_eq!(records[0].constructor_args, frozen);
    }
}
