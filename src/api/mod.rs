//! Wire model of the bridge service
//!
//! Request and response records, the API generations with their endpoint
//! tables, and the transaction shape exchanged with signers.

mod request;
mod transaction;
mod types;
mod version;

pub use self::request::{
    ActivationRequest, DepositAddressRequest, RouteType, ScheduleBody, ScheduleTransactionRequest,
    SupportedTokensQuery, TokenDescriptor, TransferOut, TransferType, NATIVE_TOKEN_SENTINEL,
};
pub use self::transaction::TransactionDescriptor;
pub use self::types::{
    ActivationResponse, BalancesResponse, DepositAddressResponse, NativeCurrency, RequestStatus,
    ScheduleTransactionResponse, SupportedChain, SupportedToken, TokenBalance, TxData,
};
pub(crate) use self::types::ServiceErrorBody;
pub use self::version::{ApiVersion, Endpoint, Operation, BALANCES_PATH};
