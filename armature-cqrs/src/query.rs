//! Query handling for CQRS

use async_trait::async_trait;
use dashmap::DashMap;
use std::any::{Any, TypeId};
use std::sync::Arc;
use thiserror::Error;

/// Query trait
///
/// Queries represent read operations in CQRS.
pub trait Query: Send + Sync + 'static {
    /// Query result type
    type Result: Send;
}

/// Query handler trait
#[async_trait]
pub trait QueryHandler<Q: Query>: Send + Sync {
    /// Handle the query
    async fn handle(&self, query: Q) -> Result<Q::Result, QueryError>;
}

/// Query error
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Query execution failed: {0}")]
    ExecutionFailed(String),

    #[error("Handler not found for query")]
    HandlerNotFound,

    #[error("Data not found: {0}")]
    NotFound(String),

    #[error("Invalid query parameters: {0}")]
    InvalidParameters(String),
}

/// Type-erased query handler
#[async_trait]
trait DynQueryHandler: Send + Sync {
    async fn handle_dyn(&self, query: Box<dyn Any + Send>) -> Result<Box<dyn Any + Send>, QueryError>;
}

/// Wrapper for typed query handlers
struct TypedQueryHandler<Q: Query, H: QueryHandler<Q>> {
    handler: H,
    _phantom: std::marker::PhantomData<Q>,
}

impl<Q: Query, H: QueryHandler<Q>> TypedQueryHandler<Q, H> {
    fn new(handler: H) -> Self {
        Self {
            handler,
            _phantom: std::marker::PhantomData,
        }
    }
}

#[async_trait]
impl<Q: Query, H: QueryHandler<Q>> DynQueryHandler for TypedQueryHandler<Q, H> {
    async fn handle_dyn(&self, query: Box<dyn Any + Send>) -> Result<Box<dyn Any + Send>, QueryError> {
        match query.downcast::<Q>() {
            Ok(qry) => {
                let result = self.handler.handle(*qry).await?;
                Ok(Box::new(result))
            }
            Err(_) => Err(QueryError::ExecutionFailed("Type mismatch".to_string())),
        }
    }
}

/// Query bus
pub struct QueryBus {
    handlers: DashMap<TypeId, Arc<dyn DynQueryHandler>>,
}

impl QueryBus {
    /// Create new query bus
    pub fn new() -> Self {
        Self {
            handlers: DashMap::new(),
        }
    }

    /// Register a query handler
    pub fn register<Q, H>(&self, handler: H)
    where
        Q: Query,
        H: QueryHandler<Q> + 'static,
    {
        let type_id = TypeId::of::<Q>();
        let handler = Arc::new(TypedQueryHandler::new(handler));
        self.handlers.insert(type_id, handler);
    }

    /// Execute a query
    pub async fn execute<Q>(&self, query: Q) -> Result<Q::Result, QueryError>
    where
        Q: Query,
    {
        let type_id = TypeId::of::<Q>();

        let handler = self
            .handlers
            .get(&type_id)
            .ok_or(QueryError::HandlerNotFound)?;

        let boxed_query: Box<dyn Any + Send> = Box::new(query);
        let result = handler.handle_dyn(boxed_query).await?;

        match result.downcast::<Q::Result>() {
            Ok(result) => Ok(*result),
            Err(_) => Err(QueryError::ExecutionFailed("Result type mismatch".to_string())),
        }
    }
}

impl Default for QueryBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize)]
    struct GetUserQuery {
        user_id: String,
    }

    impl Query for GetUserQuery {
        type Result = User;
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct User {
        id: String,
        email: String,
    }

    struct GetUserHandler;

    #[async_trait]
    impl QueryHandler<GetUserQuery> for GetUserHandler {
        async fn handle(&self, query: GetUserQuery) -> Result<User, QueryError> {
            Ok(User {
                id: query.user_id,
                email: "alice@example.com".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_query_bus() {
        let bus = QueryBus::new();
        bus.register::<GetUserQuery, _>(GetUserHandler);

        let query = GetUserQuery {
            user_id: "user-123".to_string(),
        };

        let result = bus.execute(query).await.unwrap();
        assert_eq!(result.id, "user-123");
        assert_eq!(result.email, "alice@example.com");
    }
}

