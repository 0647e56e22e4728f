//! # Inbound Ports
//!
//! API trait defining what the exit verification subsystem can do, and
//! the host invocation surface that feeds it.

use super::outbound::LedgerView;
use crate::domain::{Hash, Phase, RejectionReason};

/// Exit verification API - inbound port.
///
/// Implementations hold no per-transaction state and may be shared
/// across threads.
pub trait ExitValidationApi: Send + Sync {
    /// Validate the transaction exposed by `ledger` under `phase`.
    ///
    /// `binding_token_id` is the UDT type this protocol instance
    /// escrows. `aux_proof` is required by Challenge (fraud proof) and
    /// Withdraw (ownership signature) and ignored otherwise.
    fn validate(
        &self,
        ledger: &dyn LedgerView,
        phase: Phase,
        binding_token_id: &Hash,
        aux_proof: Option<&[u8]>,
    ) -> Result<(), RejectionReason>;

    /// Validate using parsed host arguments.
    fn validate_invocation(
        &self,
        ledger: &dyn LedgerView,
        args: &InvocationArgs,
    ) -> Result<(), RejectionReason> {
        self.validate(
            ledger,
            args.phase,
            &args.binding_token_id,
            args.aux_proof.as_deref(),
        )
    }
}

/// Arguments the host passes to the script.
///
/// Positional: `[binding_token_id_hex, phase, aux_proof_hex?]`. The
/// binding parameter is signed into the script; the rest are not.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvocationArgs {
    /// UDT type escrowed by this instance.
    pub binding_token_id: Hash,
    /// Selected phase.
    pub phase: Phase,
    /// Fraud proof or ownership signature.
    pub aux_proof: Option<Vec<u8>>,
}

impl InvocationArgs {
    /// Parse positional host arguments.
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Self, RejectionReason> {
        if args.len() < 2 {
            return Err(RejectionReason::ArgumentError(format!(
                "not enough arguments: expected at least 2, got {}",
                args.len()
            )));
        }

        let binding = decode_hex("binding token id", args[0].as_ref())?;
        let binding_token_id: Hash = binding.as_slice().try_into().map_err(|_| {
            RejectionReason::ArgumentError(format!(
                "binding token id must be 32 bytes, got {}",
                binding.len()
            ))
        })?;

        let phase = args[1]
            .as_ref()
            .parse::<Phase>()
            .map_err(RejectionReason::ArgumentError)?;

        let aux_proof = args
            .get(2)
            .map(|raw| decode_hex("auxiliary proof", raw.as_ref()))
            .transpose()?;

        Ok(Self {
            binding_token_id,
            phase,
            aux_proof,
        })
    }
}

fn decode_hex(what: &str, raw: &str) -> Result<Vec<u8>, RejectionReason> {
    let digits = raw.strip_prefix("0x").unwrap_or(raw);
    hex::decode(digits)
        .map_err(|e| RejectionReason::ArgumentError(format!("invalid {} hex: {}", what, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binding_hex() -> String {
        format!("0x{}", hex::encode([0xABu8; 32]))
    }

    #[test]
    fn test_parse_deposit() {
        let args = InvocationArgs::parse(&[binding_hex(), "deposit".to_string()]).unwrap();
        assert_eq!(args.binding_token_id, [0xABu8; 32]);
        assert_eq!(args.phase, Phase::Deposit);
        assert!(args.aux_proof.is_none());
    }

    #[test]
    fn test_parse_with_proof() {
        let args = InvocationArgs::parse(&[
            binding_hex(),
            "challenge".to_string(),
            "deadbeef".to_string(),
        ])
        .unwrap();
        assert_eq!(args.phase, Phase::Challenge);
        assert_eq!(args.aux_proof, Some(vec![0xde, 0xad, 0xbe, 0xef]));
    }

    #[test]
    fn test_parse_not_enough_arguments() {
        let result = InvocationArgs::parse(&[binding_hex()]);
        assert!(matches!(result, Err(RejectionReason::ArgumentError(_))));
    }

    #[test]
    fn test_parse_unknown_phase() {
        let result = InvocationArgs::parse(&[binding_hex(), "exit".to_string()]);
        assert!(matches!(result, Err(RejectionReason::ArgumentError(msg)) if msg.contains("exit")));
    }

    #[test]
    fn test_parse_short_binding() {
        let result = InvocationArgs::parse(&["abcd", "deposit"]);
        assert!(matches!(result, Err(RejectionReason::ArgumentError(msg)) if msg.contains("32 bytes")));
    }

    #[test]
    fn test_parse_bad_hex() {
        let result = InvocationArgs::parse(&["zz", "deposit"]);
        assert!(matches!(result, Err(RejectionReason::ArgumentError(_))));
    }
}
