use crate::{CheckResult, ErrorKind, QueryKind, RequestId};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewModel {
    pub input: String,
    pub status: StatusView,
    pub latest_request_id: RequestId,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusView {
    #[default]
    Idle,
    Pending {
        request_id: RequestId,
        query: String,
        kind: QueryKind,
    },
    Succeeded {
        request_id: RequestId,
        query: String,
        query_kind: QueryKind,
        result: CheckResult,
    },
    Failed {
        request_id: RequestId,
        query: String,
        query_kind: QueryKind,
        kind: ErrorKind,
        message: String,
    },
}
