//! Command handling for CQRS

use async_trait::async_trait;
use dashmap::DashMap;
use std::any::{Any, TypeId};
use std::sync::Arc;
use thiserror::Error;

/// Command trait
///
/// Commands represent write operations in CQRS.
pub trait Command: Send + Sync + 'static {
    /// Command result type
    type Result: Send;
}

/// Command handler trait
#[async_trait]
pub trait CommandHandler<C: Command>: Send + Sync {
    /// Handle the command
    async fn handle(&self, command: C) -> Result<C::Result, CommandError>;
}

/// Command error
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Command execution failed: {0}")]
    ExecutionFailed(String),

    #[error("Handler not found for command")]
    HandlerNotFound,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Business rule violation: {0}")]
    BusinessRuleViolation(String),
}

/// Type-erased command handler
#[async_trait]
trait DynCommandHandler: Send + Sync {
    async fn handle_dyn(
        &self,
        command: Box<dyn Any + Send>,
    ) -> Result<Box<dyn Any + Send>, CommandError>;
}

/// Wrapper for typed command handlers
struct TypedCommandHandler<C: Command, H: CommandHandler<C>> {
    handler: H,
    _phantom: std::marker::PhantomData<C>,
}

impl<C: Command, H: CommandHandler<C>> TypedCommandHandler<C, H> {
    fn new(handler: H) -> Self {
        Self {
            handler,
            _phantom: std::marker::PhantomData,
        }
    }
}

#[async_trait]
impl<C: Command, H: CommandHandler<C>> DynCommandHandler for TypedCommandHandler<C, H> {
    async fn handle_dyn(
        &self,
        command: Box<dyn Any + Send>,
    ) -> Result<Box<dyn Any + Send>, CommandError> {
        match command.downcast::<C>() {
            Ok(cmd) => {
                let result = self.handler.handle(*cmd).await?;
                Ok(Box::new(result))
            }
            Err(_) => Err(CommandError::ExecutionFailed("Type mismatch".to_string())),
        }
    }
}

/// Command bus
pub struct CommandBus {
    handlers: DashMap<TypeId, Arc<dyn DynCommandHandler>>,
}

impl CommandBus {
    /// Create new command bus
    pub fn new() -> Self {
        Self {
            handlers: DashMap::new(),
        }
    }

    /// Register a command handler
    pub fn register<C, H>(&self, handler: H)
    where
        C: Command,
        H: CommandHandler<C> + 'static,
    {
        let type_id = TypeId::of::<C>();
        let handler = Arc::new(TypedCommandHandler::new(handler));
        self.handlers.insert(type_id, handler);
    }

    /// Execute a command
    pub async fn execute<C>(&self, command: C) -> Result<C::Result, CommandError>
    where
        C: Command,
    {
        let type_id = TypeId::of::<C>();

        let handler = self
            .handlers
            .get(&type_id)
            .ok_or(CommandError::HandlerNotFound)?;

        let boxed_command: Box<dyn Any + Send> = Box::new(command);
        let result = handler.handle_dyn(boxed_command).await?;

        match result.downcast::<C::Result>() {
            Ok(result) => Ok(*result),
            Err(_) => Err(CommandError::ExecutionFailed(
                "Result type mismatch".to_string(),
            )),
        }
    }
}

impl Default for CommandBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CreateUserCommand {
        email: String,
    }

    impl Command for CreateUserCommand {
        type Result = String; // Returns user ID
    }

    struct CreateUserHandler;

    #[async_trait]
    impl CommandHandler<CreateUserCommand> for CreateUserHandler {
        async fn handle(&self, command: CreateUserCommand) -> Result<String, CommandError> {
            Ok(format!("user-{}", command.email))
        }
    }

    #[tokio::test]
    async fn test_command_bus() {
        let bus = CommandBus::new();
        bus.register::<CreateUserCommand, _>(CreateUserHandler);

        let command = CreateUserCommand {
            email: "alice@example.com".to_string(),
        };

        let result = bus.execute(command).await.unwrap();
        assert_eq!(result, "user-alice@example.com");
    }
}
