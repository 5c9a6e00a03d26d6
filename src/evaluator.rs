use crate::ast::{BinaryOp, Identifier, Node, UnaryOp};
use crate::error::{EvalError, Span};
use std::collections::HashMap;
use tracing::debug;

/// Variable bindings that outlive a single evaluation.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    values: HashMap<String, i64>,
}

impl Environment {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<i64> {
        self.values.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn bind(&mut self, name: &str, value: i64) {
        self.values.insert(name.to_string(), value);
    }
}

/// Tree-walking evaluator. Its environment persists across calls, so one
/// evaluator per session accumulates declared variables.
#[derive(Debug, Default)]
pub struct Evaluator {
    environment: Environment,
}

impl Evaluator {
    pub fn new() -> Self {
        Self {
            environment: Environment::new(),
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Evaluates a whole program or a single statement. A program yields the
    /// value of its last statement; statements before a failing one keep
    /// their bindings.
    pub fn evaluate(&mut self, node: &Node) -> Result<i64, EvalError> {
        match node {
            Node::Program { statements, span } => {
                let mut last = None;
                for statement in statements {
                    last = Some(self.execute_statement(statement)?);
                }
                last.ok_or(EvalError::EmptyProgram { span: *span })
            }
            _ => self.execute_statement(node),
        }
    }

    fn execute_statement(&mut self, node: &Node) -> Result<i64, EvalError> {
        match node {
            Node::VarDecl { name, value, .. } => {
                if self.environment.contains(name.name()) {
                    return Err(EvalError::VariableRedeclared {
                        name: name.name().to_string(),
                        span: name.token.span,
                    });
                }
                let value = self.evaluate_expression(value)?;
                self.environment.bind(name.name(), value);
                debug!(name = name.name(), value, "declared variable");
                Ok(value)
            }
            Node::VarAssign { name, value, .. } => {
                if !self.environment.contains(name.name()) {
                    return Err(undefined(name));
                }
                let value = self.evaluate_expression(value)?;
                self.environment.bind(name.name(), value);
                debug!(name = name.name(), value, "assigned variable");
                Ok(value)
            }
            Node::Program { .. } => Err(unrecognized(node)),
            _ => self.evaluate_expression(node),
        }
    }

    pub fn evaluate_expression(&self, node: &Node) -> Result<i64, EvalError> {
        match node {
            Node::IntegerLiteral { value, .. } => Ok(*value),
            Node::BinaryOp {
                left,
                operator,
                right,
                ..
            } => {
                let left_val = self.evaluate_expression(left)?;
                let right_val = self.evaluate_expression(right)?;
                evaluate_binary_op(*operator, left_val, right_val, right.span())
            }
            Node::UnaryOp {
                operator, operand, ..
            } => {
                let operand_val = self.evaluate_expression(operand)?;
                Ok(match operator {
                    UnaryOp::Plus => operand_val,
                    UnaryOp::Negate => operand_val.wrapping_neg(),
                })
            }
            Node::Identifier(ident) => self
                .environment
                .get(ident.name())
                .ok_or_else(|| undefined(ident)),
            Node::Program { .. } | Node::VarDecl { .. } | Node::VarAssign { .. } => {
                Err(unrecognized(node))
            }
        }
    }
}

// Overflow wraps in two's complement, including `i64::MIN / -1`.
fn evaluate_binary_op(
    operator: BinaryOp,
    left: i64,
    right: i64,
    right_span: Span,
) -> Result<i64, EvalError> {
    match operator {
        BinaryOp::Add => Ok(left.wrapping_add(right)),
        BinaryOp::Subtract => Ok(left.wrapping_sub(right)),
        BinaryOp::Multiply => Ok(left.wrapping_mul(right)),
        BinaryOp::Divide => {
            if right == 0 {
                return Err(EvalError::DivisionByZero { span: right_span });
            }
            Ok(left.wrapping_div(right))
        }
    }
}

fn undefined(ident: &Identifier) -> EvalError {
    EvalError::UndefinedVariable {
        name: ident.name().to_string(),
        span: ident.token.span,
    }
}

fn unrecognized(node: &Node) -> EvalError {
    EvalError::UnrecognizedNode {
        kind: node.kind_name(),
        span: node.span(),
    }
}
