//! Parse context tracking for context-aware error messages
//!
//! The parser maintains a stack of contexts to generate more helpful
//! error messages that indicate where in the source structure the error occurred.

/// Represents the current parsing context
///
/// Used to generate context-aware error messages and determine
/// appropriate recovery strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseContext {
    /// At the top level of a file
    TopLevel,
    /// Inside a namespace body
    NamespaceBody,
    /// Inside a model body
    ModelBody,
    /// Inside an interface body
    InterfaceBody,
    /// Inside an enum body
    EnumBody,
    /// Parsing an operation parameter list
    ParameterList,
    /// Parsing template parameters `<T, U>`
    TemplateParameterList,
    /// Parsing template arguments `<string, int32>`
    TemplateArgumentList,
    /// Parsing decorator arguments
    DecoratorArguments,
    /// Parsing a tuple expression `[...]`
    Tuple,
    /// Parsing an expression
    Expression,
}

impl ParseContext {
    /// Get a human-readable description of this context for error messages
    pub fn description(&self) -> &'static str {
        match self {
            Self::TopLevel => "at top level",
            Self::NamespaceBody => "in namespace body",
            Self::ModelBody => "in model body",
            Self::InterfaceBody => "in interface body",
            Self::EnumBody => "in enum body",
            Self::ParameterList => "in parameter list",
            Self::TemplateParameterList => "in template parameter list",
            Self::TemplateArgumentList => "in template argument list",
            Self::DecoratorArguments => "in decorator arguments",
            Self::Tuple => "in tuple expression",
            Self::Expression => "in expression",
        }
    }
}
