//! Single-writer actor for the SQLite database.
//!
//! SQLite allows one writer at a time. Instead of letting pool connections
//! race for the write lock, a single background task owns one connection
//! and applies every mutation serially, each wrapped in an immediate
//! transaction. Trade-order checks run inside those transactions, so two
//! concurrent orders against the same account cannot interleave.

use std::any::Any;

use diesel::{Connection, SqliteConnection};
use tokio::sync::{mpsc, oneshot};

use super::DbPool;
use crate::errors::StorageError;
use papertrade_core::errors::Result;

// A queued unit of work: runs against the writer's connection, inside the
// transaction the actor opens for it.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;

type ErasedJob = Job<Box<dyn Any + Send + 'static>>;
type Reply = oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>;

/// Handle for sending jobs to the writer actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<(ErasedJob, Reply)>,
}

impl WriteHandle {
    /// Executes a database job on the writer's dedicated connection and
    /// returns its result. The job runs inside an immediate transaction:
    /// an `Err` from the closure rolls everything back.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (ret_tx, ret_rx) = oneshot::channel();

        // Erase the job's return type so one channel carries every job.
        self.tx
            .send((
                Box::new(move |c| job(c).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                ret_tx,
            ))
            .await
            .expect("Writer actor channel closed, the actor has stopped");

        ret_rx
            .await
            .expect("Writer actor dropped the reply sender")
            .map(|boxed: Box<dyn Any + Send + 'static>| {
                *boxed
                    .downcast::<T>()
                    .unwrap_or_else(|_| panic!("Writer actor result had an unexpected type"))
            })
    }
}

/// Spawns the writer actor and returns a handle to it.
///
/// The actor holds one connection from the pool for its whole lifetime and
/// terminates when the last `WriteHandle` is dropped.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<(ErasedJob, Reply)>(1024);

    tokio::spawn(async move {
        let mut conn = pool
            .get()
            .expect("Failed to get a connection from the pool for the writer actor");

        while let Some((job, reply_tx)) = rx.recv().await {
            // StorageError implements From<diesel::result::Error> for the
            // transaction plumbing and carries domain errors through the
            // Domain variant, so rejections keep their type after rollback.
            let result: Result<Box<dyn Any + Send + 'static>> = conn
                .immediate_transaction::<_, StorageError, _>(|c| {
                    job(c).map_err(StorageError::from)
                })
                .map_err(|e: StorageError| e.into());

            // Receiver may have gone away (request cancelled); that's fine.
            let _ = reply_tx.send(result);
        }
    });

    WriteHandle { tx }
}
