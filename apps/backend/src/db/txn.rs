use futures_util::future::BoxFuture;
use sea_orm::{DatabaseTransaction, TransactionTrait};
use tracing::warn;

use super::require_db;
use crate::error::AppError;
use crate::state::app_state::AppState;

/// Execute `f` within a database transaction.
///
/// Commits when `f` returns `Ok`, rolls back when it returns `Err`. The
/// transaction handle is passed explicitly, so everything `f` does through
/// it is invisible to other connections until commit.
///
/// ```ignore
/// let created = with_txn(&state, move |txn| {
///     Box::pin(async move { Ok(labubu::create_labubu(txn, &text).await?) })
/// })
/// .await?;
/// ```
pub async fn with_txn<R, F>(state: &AppState, f: F) -> Result<R, AppError>
where
    F: for<'c> FnOnce(&'c DatabaseTransaction) -> BoxFuture<'c, Result<R, AppError>>,
{
    let db = require_db(state)?;
    let txn = db.begin().await?;

    match f(&txn).await {
        Ok(val) => {
            txn.commit().await?;
            Ok(val)
        }
        Err(err) => {
            // preserve the original error; a failed rollback is only logged
            if let Err(rollback_err) = txn.rollback().await {
                warn!(error = %rollback_err, "rollback after failed transaction also failed");
            }
            Err(err)
        }
    }
}
