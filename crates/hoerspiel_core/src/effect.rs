use crate::RequestId;

/// One paginated search, as handed to the fetch engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub term: String,
    pub target: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Single search; answered with `Msg::SearchCompleted`.
    Fetch {
        request_id: RequestId,
        request: SearchRequest,
    },
    /// Independent searches run side by side and joined; answered with
    /// `Msg::LandingCompleted` in request order.
    FetchAll {
        request_id: RequestId,
        requests: Vec<SearchRequest>,
    },
}
