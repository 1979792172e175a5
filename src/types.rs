//! Re-exports of the data types callers of `tcc` interact with.

pub use tcc_core::{
    Ack, ParticipantEntry, ParticipantId, Payload, RequestEntity, Transaction, TryStatus, TxId,
    TxStatus,
};
