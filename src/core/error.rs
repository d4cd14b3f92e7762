// File: src/core/error.rs

/*!
# Unified Error Type

This module provides the unified error enum for graphwire. The engine never
returns errors for domain-level refusals (those are ordinary return values
surfaced as protocol replies); this type covers the server layer's transport,
configuration, and address-parsing failures.
*/

use std::error::Error;
use std::fmt;

/// Unified error type for graphwire server operations.
#[derive(Debug)]
pub enum GraphwireError {
    /// General-purpose error
    Generic(String),

    /// I/O error on the listener or a session socket
    Io(String),

    /// Malformed bind address
    InvalidAddr(String),

    /// Invalid or unreadable configuration
    Config(String),

    /// Serialization/deserialization error
    Serialization(String),
}

impl GraphwireError {
    /// Creates a generic error with the given message.
    pub fn generic(message: impl Into<String>) -> Self {
        GraphwireError::Generic(message.into())
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        GraphwireError::Config(message.into())
    }
}

impl fmt::Display for GraphwireError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GraphwireError::Generic(msg) => write!(f, "Graphwire error: {}", msg),
            GraphwireError::Io(msg) => write!(f, "I/O error: {}", msg),
            GraphwireError::InvalidAddr(msg) => write!(f, "Invalid address: {}", msg),
            GraphwireError::Config(msg) => write!(f, "Invalid configuration: {}", msg),
            GraphwireError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl Error for GraphwireError {}

impl From<std::io::Error> for GraphwireError {
    fn from(e: std::io::Error) -> Self {
        GraphwireError::Io(e.to_string())
    }
}

impl From<std::net::AddrParseError> for GraphwireError {
    fn from(e: std::net::AddrParseError) -> Self {
        GraphwireError::InvalidAddr(e.to_string())
    }
}

impl From<serde_json::Error> for GraphwireError {
    fn from(e: serde_json::Error) -> Self {
        GraphwireError::Serialization(e.to_string())
    }
}
