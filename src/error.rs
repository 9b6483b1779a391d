use alloy::{contract, transports};

use crate::abi::Selector;

/// Errors aborting a triage run.
///
/// Decode errors ([`Self::UnrecognizedSelector`], [`Self::TruncatedInput`])
/// carry the failing byte position; network errors carry the RPC method that
/// failed, so a run can be reproduced without replaying the whole pipeline.
///
/// An asset missing from the registry is not an error, see
/// [`crate::types::NormalizedAmount::Unknown`].
#[derive(Debug, thiserror::Error)]
pub enum TriageError {
    #[error("unrecognized call selector: 0x{}", alloy::hex::encode(found))]
    UnrecognizedSelector { found: Selector },

    #[error(
        "truncated call input at byte {offset}: need {expected} argument bytes in whole 32-byte slots"
    )]
    TruncatedInput { offset: usize, expected: usize },

    #[error("malformed response from {method}: {detail}")]
    MalformedRpcResponse {
        method: &'static str,
        detail: String,
    },

    #[error("transport failure calling {method}: {detail}")]
    RpcUnavailable {
        method: &'static str,
        detail: String,
    },

    #[error("node error from {method} (code {code:?}): {message}")]
    RpcError {
        method: &'static str,
        code: Option<i64>,
        message: String,
    },
}

impl TriageError {
    /// Classifies an RPC transport error for `method`.
    ///
    /// Node-reported errors become [`Self::RpcError`], undecodable payloads
    /// become [`Self::MalformedRpcResponse`], everything else is a transport
    /// failure.
    pub(crate) fn from_rpc<E: std::fmt::Display>(
        method: &'static str,
        value: transports::RpcError<E>,
    ) -> Self {
        match value {
            transports::RpcError::ErrorResp(ref resp) => Self::RpcError {
                method,
                code: Some(resp.code),
                message: resp.message.to_string(),
            },
            transports::RpcError::NullResp => Self::MalformedRpcResponse {
                method,
                detail: "unexpected empty response".to_string(),
            },
            transports::RpcError::DeserError { err, text } => Self::MalformedRpcResponse {
                method,
                detail: format!("{err}: {text}"),
            },
            _ => Self::RpcUnavailable {
                method,
                detail: value.to_string(),
            },
        }
    }

    /// Classifies a contract-call error for `method`.
    pub(crate) fn from_contract(method: &'static str, value: contract::Error) -> Self {
        match value {
            contract::Error::TransportError(rpc_err) => Self::from_rpc(method, rpc_err),
            contract::Error::ZeroData(_, _) | contract::Error::AbiError(_) => {
                Self::MalformedRpcResponse {
                    method,
                    detail: value.to_string(),
                }
            }
            _ => Self::RpcUnavailable {
                method,
                detail: value.to_string(),
            },
        }
    }

    /// Result of `method` was null where a value is required.
    pub(crate) fn not_found(method: &'static str, what: &str) -> Self {
        Self::RpcError {
            method,
            code: None,
            message: format!("{what} not found"),
        }
    }

    /// `method` did not complete within the caller-supplied timeout.
    pub(crate) fn timeout(method: &'static str) -> Self {
        Self::RpcUnavailable {
            method,
            detail: "timed out".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloy::{
        rpc::json_rpc::ErrorPayload,
        transports::{RpcError, TransportErrorKind},
    };

    use super::*;

    fn node_error(code: i64, message: &str) -> RpcError<TransportErrorKind> {
        RpcError::ErrorResp(ErrorPayload {
            code,
            message: message.to_string().into(),
            data: None,
        })
    }

    #[test]
    fn test_node_reported_error_maps_to_rpc_error() {
        let err = TriageError::from_rpc("eth_call", node_error(3, "execution reverted"));
        assert!(matches!(
            err,
            TriageError::RpcError {
                method: "eth_call",
                code: Some(3),
                ref message,
            } if message == "execution reverted"
        ));
    }

    #[test]
    fn test_null_response_maps_to_malformed() {
        let err = TriageError::from_rpc(
            "eth_getTransactionReceipt",
            RpcError::<TransportErrorKind>::NullResp,
        );
        assert!(matches!(
            err,
            TriageError::MalformedRpcResponse {
                method: "eth_getTransactionReceipt",
                ..
            }
        ));
    }

    #[test]
    fn test_other_transport_failures_map_to_unavailable() {
        let err = TriageError::from_rpc(
            "eth_blockNumber",
            RpcError::<TransportErrorKind>::UnsupportedFeature("pubsub"),
        );
        assert!(matches!(err, TriageError::RpcUnavailable { .. }));
    }

    #[test]
    fn test_contract_transport_error_classified_through() {
        let err = TriageError::from_contract(
            "eth_call/balanceOf",
            contract::Error::TransportError(RpcError::NullResp),
        );
        assert!(matches!(
            err,
            TriageError::MalformedRpcResponse {
                method: "eth_call/balanceOf",
                ..
            }
        ));

        let err = TriageError::from_contract(
            "eth_call/allowance",
            contract::Error::TransportError(node_error(-32000, "header not found")),
        );
        assert!(matches!(
            err,
            TriageError::RpcError {
                code: Some(-32000),
                ..
            }
        ));
    }
}
