use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifier of a card on the board (`n0`, `n1`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric part of an id with the given prefix, e.g. `7` for `n7`.
    pub(crate) fn numeric_suffix(&self, prefix: char) -> Option<u64> {
        self.0.strip_prefix(prefix).unwrap_or(&self.0).parse().ok()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// The four binary operators a Step can apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Operation {
    #[default]
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-", alias = "−")]
    Subtract,
    #[serde(rename = "×", alias = "*")]
    Multiply,
    #[serde(rename = "÷", alias = "/")]
    Divide,
}

impl Operation {
    pub fn symbol(self) -> &'static str {
        match self {
            Operation::Add => "+",
            Operation::Subtract => "-",
            Operation::Multiply => "×",
            Operation::Divide => "÷",
        }
    }

    /// `1` for `×`/`÷`, `0` for `+`/`-`.
    pub fn precedence(self) -> u8 {
        match self {
            Operation::Add | Operation::Subtract => 0,
            Operation::Multiply | Operation::Divide => 1,
        }
    }

    pub fn is_multiplicative(self) -> bool {
        self.precedence() == 1
    }

    /// Applies the operator. Division by exactly zero and a NaN outcome
    /// (such as `∞ - ∞`) yield `None`.
    pub fn apply(self, left: f64, right: f64) -> Option<f64> {
        let value = match self {
            Operation::Add => left + right,
            Operation::Subtract => left - right,
            Operation::Multiply => left * right,
            Operation::Divide if right == 0.0 => return None,
            Operation::Divide => left / right,
        };
        (!value.is_nan()).then_some(value)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Canvas coordinates. Opaque to the engine apart from auto layout.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Discriminant used when creating nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Source,
    Step,
    Result,
}

/// Type-specific payload of a node.
///
/// Fields only exist on the variants they are meaningful for, so a Source
/// can never carry an operation and a Result never has a stored value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NodeKind {
    #[serde(alias = "origem")]
    Source {
        #[serde(default, deserialize_with = "null_as_zero")]
        value: f64,
    },
    #[serde(alias = "etapa")]
    Step {
        /// Second operand used when only one edge feeds the step.
        #[serde(default)]
        value: Option<f64>,
        #[serde(default)]
        operation: Operation,
    },
    #[serde(alias = "resultado")]
    Result {
        /// Calculator mode: evaluate the upstream chain with precedence.
        #[serde(default, rename = "evalPrecedence")]
        eval_precedence: bool,
    },
}

impl NodeKind {
    /// Default payload for a freshly created node of the given type.
    pub fn new(node_type: NodeType) -> Self {
        match node_type {
            NodeType::Source => NodeKind::Source { value: 0.0 },
            NodeType::Step => NodeKind::Step {
                value: Some(0.0),
                operation: Operation::Add,
            },
            NodeType::Result => NodeKind::Result {
                eval_precedence: false,
            },
        }
    }

    pub fn node_type(&self) -> NodeType {
        match self {
            NodeKind::Source { .. } => NodeType::Source,
            NodeKind::Step { .. } => NodeType::Step,
            NodeKind::Result { .. } => NodeType::Result,
        }
    }
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

/// A card on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(flatten)]
    pub kind: NodeKind,
    #[serde(default)]
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Node {
    pub fn new(id: NodeId, node_type: NodeType, position: Position) -> Self {
        Self {
            id,
            kind: NodeKind::new(node_type),
            position,
            title: None,
        }
    }

    pub fn node_type(&self) -> NodeType {
        self.kind.node_type()
    }

    pub fn is_source(&self) -> bool {
        matches!(self.kind, NodeKind::Source { .. })
    }

    pub fn is_result(&self) -> bool {
        matches!(self.kind, NodeKind::Result { .. })
    }

    /// The node's own stored number, if its type has one.
    pub fn stored_value(&self) -> Option<f64> {
        match self.kind {
            NodeKind::Source { value } => Some(value),
            NodeKind::Step { value, .. } => value,
            NodeKind::Result { .. } => None,
        }
    }

    pub fn operation(&self) -> Option<Operation> {
        match self.kind {
            NodeKind::Step { operation, .. } => Some(operation),
            _ => None,
        }
    }

    /// Applies a partial update. Fields that do not exist on this node's
    /// variant are ignored.
    pub fn apply_patch(&mut self, patch: NodePatch) {
        if let Some(position) = patch.position {
            self.position = position;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        match &mut self.kind {
            NodeKind::Source { value } => {
                if let Some(new_value) = patch.value {
                    *value = new_value.unwrap_or(0.0);
                }
            }
            NodeKind::Step { value, operation } => {
                if let Some(new_value) = patch.value {
                    *value = new_value;
                }
                if let Some(new_operation) = patch.operation {
                    *operation = new_operation;
                }
            }
            NodeKind::Result { eval_precedence } => {
                if let Some(flag) = patch.eval_precedence {
                    *eval_precedence = flag;
                }
            }
        }
    }
}

/// Partial node update. `None` leaves a field untouched; nested options
/// allow clearing (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodePatch {
    pub value: Option<Option<f64>>,
    pub operation: Option<Operation>,
    pub title: Option<Option<String>>,
    pub position: Option<Position>,
    pub eval_precedence: Option<bool>,
}

impl NodePatch {
    pub fn value(value: f64) -> Self {
        Self {
            value: Some(Some(value)),
            ..Self::default()
        }
    }

    pub fn operation(operation: Operation) -> Self {
        Self {
            operation: Some(operation),
            ..Self::default()
        }
    }

    pub fn with_value(mut self, value: Option<f64>) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_operation(mut self, operation: Operation) -> Self {
        self.operation = Some(operation);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(Some(title.into()));
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_eval_precedence(mut self, flag: bool) -> Self {
        self.eval_precedence = Some(flag);
        self
    }
}
