//! Proposed tool invocations.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One proposed tool action: a tool name and its named arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocation {
    /// Name of the tool (e.g. `"bash"`, `"read"`).
    pub tool_name: String,
    /// Named arguments, as sent by the agent.
    #[serde(default)]
    pub input: Map<String, Value>,
}

impl ToolInvocation {
    /// Create an invocation with no arguments.
    #[must_use]
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            input: Map::new(),
        }
    }

    /// Add an argument.
    #[must_use]
    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.input.insert(key.into(), value.into());
        self
    }

    /// Get a string argument. Non-string values are treated as absent.
    #[must_use]
    pub fn arg_str(&self, key: &str) -> Option<&str> {
        self.input.get(key).and_then(Value::as_str)
    }

    /// The file-path argument, if any.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        self.arg_str("path").filter(|p| !p.is_empty())
    }

    /// The shell command argument, if any.
    #[must_use]
    pub fn command(&self) -> Option<&str> {
        self.arg_str("command")
    }

    /// Check whether this invocation targets the named tool.
    #[must_use]
    pub fn is_tool(&self, name: &str) -> bool {
        self.tool_name == name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_and_command_accessors() {
        let read = ToolInvocation::new("read").with_arg("path", "src/main.py");
        assert_eq!(read.path(), Some("src/main.py"));
        assert_eq!(read.command(), None);

        let bash = ToolInvocation::new("bash").with_arg("command", "ls -la");
        assert!(bash.is_tool("bash"));
        assert_eq!(bash.command(), Some("ls -la"));
        assert_eq!(bash.path(), None);
    }

    #[test]
    fn test_non_string_path_is_absent() {
        let inv = ToolInvocation::new("write").with_arg("path", 42);
        assert_eq!(inv.path(), None);

        let empty = ToolInvocation::new("write").with_arg("path", "");
        assert_eq!(empty.path(), None);
    }
}
