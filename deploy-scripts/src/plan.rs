//! The fixed deployment plan and constructor-argument resolution.
//!
//! The four contracts are deployed in a hand-ordered sequence rather than
//! through a dependency graph: each step's constructor arguments may only
//! reference contracts that appear strictly earlier in the plan, so a single
//! linear pass over the plan resolves every argument.

use ethers::abi::Token;

use crate::{context::ExecutionContext, errors::ScriptError, types::Target};

/// A single constructor argument in the deployment plan.
///
/// Literals are drawn from the [`ExecutionContext`] at resolution time;
/// `Deployed` is a forward reference to the address of a contract deployed
/// earlier in the same run (or supplied as an override).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConstructorArg {
    /// The operator (deployer) wallet address
    Operator,
    /// The 32-byte genesis state root
    GenesisRoot,
    /// The resolved address of a previously deployed contract
    Deployed(Target),
}

/// One step of the deployment plan: a target and its constructor arguments
#[derive(Copy, Clone, Debug)]
pub struct PlanStep {
    /// The contract deployed by this step
    pub target: Target,
    /// The constructor arguments, in ABI order
    pub args: &'static [ConstructorArg],
}

/// The fixed deployment plan.
///
/// Governance takes the operator address; the priority queue takes the
/// governance address; the verifier takes no arguments; the rollup contract
/// takes the three prior addresses, the operator address, and the genesis
/// root.
pub fn deployment_plan() -> [PlanStep; 4] {
    [
        PlanStep {
            target: Target::Governance,
            args: &[ConstructorArg::Operator],
        },
        PlanStep {
            target: Target::PriorityQueue,
            args: &[ConstructorArg::Deployed(Target::Governance)],
        },
        PlanStep {
            target: Target::Verifier,
            args: &[],
        },
        PlanStep {
            target: Target::Rollup,
            args: &[
                ConstructorArg::Deployed(Target::Governance),
                ConstructorArg::Deployed(Target::Verifier),
                ConstructorArg::Deployed(Target::PriorityQueue),
                ConstructorArg::Operator,
                ConstructorArg::GenesisRoot,
            ],
        },
    ]
}

/// Resolve a step's constructor arguments against the execution context.
///
/// Fails with [`ScriptError::MissingAddress`] if a forward reference points
/// at a contract whose address is not yet known. Given the fixed plan order
/// this can only happen when an override is missing in a partial run.
pub fn resolve_args(
    args: &[ConstructorArg],
    ctx: &ExecutionContext,
) -> Result<Vec<Token>, ScriptError> {
    args.iter()
        .map(|arg| match arg {
            ConstructorArg::Operator => Ok(Token::Address(ctx.operator_address)),
            ConstructorArg::GenesisRoot => {
                Ok(Token::FixedBytes(ctx.genesis_root.as_bytes().to_vec()))
            }
            ConstructorArg::Deployed(target) => ctx
                .address_of(*target)
                .map(Token::Address)
                .ok_or_else(|| ScriptError::MissingAddress(target.to_string())),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use ethers::types::{Address, H256};

    use super::*;
    use crate::types::Network;

    /// A context with no resolved addresses
    fn empty_context() -> ExecutionContext {
        ExecutionContext::new(
            Network::Localhost,
            Address::from_low_u64_be(1),
            Address::from_low_u64_be(2),
            Address::from_low_u64_be(3),
            H256::zero(),
        )
    }

    /// Every forward reference in the plan points at a target deployed
    /// strictly earlier in the fixed order
    #[test]
    fn forward_references_point_earlier() {
        let plan = deployment_plan();
        for (position, step) in plan.iter().enumerate() {
            for arg in step.args {
                if let ConstructorArg::Deployed(target) = arg {
                    let referenced_position = plan
                        .iter()
                        .position(|s| s.target == *target)
                        .expect("referenced target not in plan");
                    assert!(
                        referenced_position < position,
                        "{} references {} which deploys later",
                        step.target,
                        target,
                    );
                }
            }
        }
    }

    /// The plan covers all four targets in the documented order
    #[test]
    fn plan_order_is_fixed() {
        let order: Vec<Target> = deployment_plan().iter().map(|s| s.target).collect();
        assert_eq!(order, Target::ALL.to_vec());
    }

    /// Resolution fails fatally when a forward reference has no address
    #[test]
    fn unresolved_reference_is_an_error() {
        let ctx = empty_context();
        let err = resolve_args(&[ConstructorArg::Deployed(Target::Governance)], &ctx)
            .expect_err("resolution should fail without a governance address");
        assert!(matches!(err, ScriptError::MissingAddress(_)));
    }

    /// With all addresses known, the rollup step resolves to the documented
    /// argument list in order
    #[test]
    fn rollup_args_resolve_in_order() {
        let mut ctx = empty_context();
        let governance = Address::from_low_u64_be(10);
        let priority_queue = Address::from_low_u64_be(11);
        let verifier = Address::from_low_u64_be(12);
        ctx.set_override(Target::Governance, governance);
        ctx.set_override(Target::PriorityQueue, priority_queue);
        ctx.set_override(Target::Verifier, verifier);

        let plan = deployment_plan();
        let rollup_step = plan[3];
        let tokens = resolve_args(rollup_step.args, &ctx).unwrap();

        assert_eq!(
            tokens,
            vec![
                Token::Address(governance),
                Token::Address(verifier),
                Token::Address(priority_queue),
                Token::Address(ctx.operator_address),
                Token::FixedBytes(vec![0u8; 32]),
            ]
        );
    }
}
