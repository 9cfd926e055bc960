use std::sync::Arc;

use crate::domain::entities::account::{build_account_tree, AccountNode, AccountRecord};
use crate::usecase::ports::api::{ApiError, ErpApi};

pub struct LedgerService {
    api: Arc<dyn ErpApi>,
}

impl LedgerService {
    pub fn new(api: Arc<dyn ErpApi>) -> Self {
        Self { api }
    }

    // Rebuilds the aggregated tree from scratch on every fetch;
    // expand/collapse only changes which precomputed rows are shown.
    pub fn load_tree(&self) -> Result<(Vec<AccountRecord>, Vec<AccountNode>), ApiError> {
        let records = self.api.account_heads()?;
        let tree = build_account_tree(&records);
        Ok((records, tree))
    }
}
