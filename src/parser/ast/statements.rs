use smol_str::SmolStr;

use super::*;

// ============================================================================
// Root
// ============================================================================

ast_node!(SourceFile, SOURCE_FILE);

impl SourceFile {
    children_method!(statements, Statement);

    /// Declaration statements only, with empty statements filtered out
    pub fn items(&self) -> impl Iterator<Item = Statement> + '_ {
        self.statements()
            .filter(|s| !matches!(s, Statement::Empty(_)))
    }
}

// ============================================================================
// Statements
// ============================================================================

/// Any top-level or namespace-body statement
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Statement {
    Namespace(NamespaceStatement),
    Import(ImportStatement),
    Using(UsingStatement),
    Model(ModelStatement),
    Scalar(ScalarStatement),
    Interface(InterfaceStatement),
    Enum(EnumStatement),
    Alias(AliasStatement),
    AugmentDecorator(AugmentDecoratorStatement),
    Operation(OperationStatement),
    Empty(EmptyStatement),
}

impl AstNode for Statement {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::NAMESPACE_STATEMENT
                | SyntaxKind::IMPORT_STATEMENT
                | SyntaxKind::USING_STATEMENT
                | SyntaxKind::MODEL_STATEMENT
                | SyntaxKind::SCALAR_STATEMENT
                | SyntaxKind::INTERFACE_STATEMENT
                | SyntaxKind::ENUM_STATEMENT
                | SyntaxKind::ALIAS_STATEMENT
                | SyntaxKind::AUGMENT_DECORATOR_STATEMENT
                | SyntaxKind::OPERATION_STATEMENT
                | SyntaxKind::EMPTY_STATEMENT
        )
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        let statement = match node.kind() {
            SyntaxKind::NAMESPACE_STATEMENT => Self::Namespace(NamespaceStatement(node)),
            SyntaxKind::IMPORT_STATEMENT => Self::Import(ImportStatement(node)),
            SyntaxKind::USING_STATEMENT => Self::Using(UsingStatement(node)),
            SyntaxKind::MODEL_STATEMENT => Self::Model(ModelStatement(node)),
            SyntaxKind::SCALAR_STATEMENT => Self::Scalar(ScalarStatement(node)),
            SyntaxKind::INTERFACE_STATEMENT => Self::Interface(InterfaceStatement(node)),
            SyntaxKind::ENUM_STATEMENT => Self::Enum(EnumStatement(node)),
            SyntaxKind::ALIAS_STATEMENT => Self::Alias(AliasStatement(node)),
            SyntaxKind::AUGMENT_DECORATOR_STATEMENT => {
                Self::AugmentDecorator(AugmentDecoratorStatement(node))
            }
            SyntaxKind::OPERATION_STATEMENT => Self::Operation(OperationStatement(node)),
            SyntaxKind::EMPTY_STATEMENT => Self::Empty(EmptyStatement(node)),
            _ => return None,
        };
        Some(statement)
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Namespace(s) => s.syntax(),
            Self::Import(s) => s.syntax(),
            Self::Using(s) => s.syntax(),
            Self::Model(s) => s.syntax(),
            Self::Scalar(s) => s.syntax(),
            Self::Interface(s) => s.syntax(),
            Self::Enum(s) => s.syntax(),
            Self::Alias(s) => s.syntax(),
            Self::AugmentDecorator(s) => s.syntax(),
            Self::Operation(s) => s.syntax(),
            Self::Empty(s) => s.syntax(),
        }
    }
}

// ============================================================================
// Namespace
// ============================================================================

ast_node!(NamespaceStatement, NAMESPACE_STATEMENT);
ast_node!(NamespaceBody, NAMESPACE_BODY);

impl NamespaceStatement {
    first_child_method!(decorators, DecoratorList);
    first_child_method!(body, NamespaceBody);

    /// The declared namespace path, e.g. `Pets.Api`
    pub fn path(&self) -> Option<SmolStr> {
        path_text(&self.0)
    }

    /// A file-scoped declaration ends with `;` and has no body
    pub fn is_file_scoped(&self) -> bool {
        self.body().is_none()
    }
}

impl NamespaceBody {
    children_method!(statements, Statement);
}

// ============================================================================
// Import / Using
// ============================================================================

ast_node!(ImportStatement, IMPORT_STATEMENT);
ast_node!(UsingStatement, USING_STATEMENT);

impl ImportStatement {
    /// The unescaped import path
    pub fn path(&self) -> Option<SmolStr> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| t.kind().is_string_literal())
            .map(|t| SmolStr::new(unescape_string_literal(t.text())))
    }
}

impl UsingStatement {
    /// The referenced namespace path, e.g. `Pets.Api`
    pub fn path(&self) -> Option<SmolStr> {
        path_text(&self.0)
    }
}

// ============================================================================
// Model
// ============================================================================

ast_node!(ModelStatement, MODEL_STATEMENT);
ast_node!(ModelIsHeritage, MODEL_IS_HERITAGE);
ast_node!(ModelExtendsHeritage, MODEL_EXTENDS_HERITAGE);
ast_node!(ModelBody, MODEL_BODY);
ast_node!(ModelProperty, MODEL_PROPERTY);
ast_node!(ModelSpreadProperty, MODEL_SPREAD_PROPERTY);

impl ModelStatement {
    first_child_method!(decorators, DecoratorList);
    first_child_method!(template_parameters, TemplateParameters);
    first_child_method!(is_heritage, ModelIsHeritage);
    first_child_method!(extends_heritage, ModelExtendsHeritage);

    pub fn name(&self) -> Option<SmolStr> {
        declared_name_token(&self.0).map(|t| name_token_text(&t))
    }

    /// The `{ ... }` part, absent for `model X is T;`
    pub fn body(&self) -> Option<ModelExpression> {
        self.0.children().find_map(ModelExpression::cast)
    }
}

impl ModelIsHeritage {
    first_child_method!(base, Expression);
}

impl ModelExtendsHeritage {
    first_child_method!(base, Expression);
}

impl ModelBody {
    children_method!(properties, ModelProperty);
    children_method!(spreads, ModelSpreadProperty);

    /// Properties and spreads in declaration order
    pub fn members(&self) -> impl Iterator<Item = ModelMember> + '_ {
        self.0.children().filter_map(ModelMember::cast)
    }
}

/// A named property or a spread inside a model body or parameter list
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ModelMember {
    Property(ModelProperty),
    Spread(ModelSpreadProperty),
}

impl AstNode for ModelMember {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::MODEL_PROPERTY | SyntaxKind::MODEL_SPREAD_PROPERTY
        )
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::MODEL_PROPERTY => Some(Self::Property(ModelProperty(node))),
            SyntaxKind::MODEL_SPREAD_PROPERTY => Some(Self::Spread(ModelSpreadProperty(node))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Property(p) => p.syntax(),
            Self::Spread(s) => s.syntax(),
        }
    }
}

impl ModelProperty {
    first_child_method!(decorators, DecoratorList);

    pub fn name(&self) -> Option<SmolStr> {
        member_name_token(&self.0).map(|t| name_token_text(&t))
    }

    /// `name?: T` marks the property optional
    pub fn is_optional(&self) -> bool {
        has_token(&self.0, SyntaxKind::QUESTION)
    }

    /// The type expression after the `:`
    pub fn type_expression(&self) -> Option<Expression> {
        self.0.children().find_map(Expression::cast)
    }
}

impl ModelSpreadProperty {
    first_child_method!(target, ReferenceExpression);
}

// ============================================================================
// Scalar
// ============================================================================

ast_node!(ScalarStatement, SCALAR_STATEMENT);
ast_node!(ScalarExtends, SCALAR_EXTENDS);

impl ScalarStatement {
    first_child_method!(decorators, DecoratorList);
    first_child_method!(template_parameters, TemplateParameters);
    first_child_method!(extends, ScalarExtends);

    pub fn name(&self) -> Option<SmolStr> {
        declared_name_token(&self.0).map(|t| name_token_text(&t))
    }
}

impl ScalarExtends {
    first_child_method!(base, Expression);
}

// ============================================================================
// Interface
// ============================================================================

ast_node!(InterfaceStatement, INTERFACE_STATEMENT);
ast_node!(InterfaceHeritage, INTERFACE_HERITAGE);
ast_node!(InterfaceBody, INTERFACE_BODY);
ast_node!(InterfaceMember, INTERFACE_MEMBER);

impl InterfaceStatement {
    first_child_method!(template_parameters, TemplateParameters);
    first_child_method!(heritage, InterfaceHeritage);
    first_child_method!(body, InterfaceBody);

    pub fn name(&self) -> Option<SmolStr> {
        declared_name_token(&self.0).map(|t| name_token_text(&t))
    }
}

impl InterfaceHeritage {
    /// The interfaces after `extends`
    pub fn bases(&self) -> impl Iterator<Item = ReferenceExpression> + '_ {
        self.0
            .children()
            .filter(|n| n.kind() == SyntaxKind::REFERENCE_EXPRESSION_LIST)
            .flat_map(|list| list.children().filter_map(ReferenceExpression::cast))
    }
}

impl InterfaceBody {
    children_method!(members, InterfaceMember);
}

impl InterfaceMember {
    first_child_method!(signature, OperationSignature);

    /// The last name-ish token before the signature; `op` counts as the
    /// name only when no other name follows it
    pub fn name(&self) -> Option<SmolStr> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .filter(|t| t.kind().is_name())
            .last()
            .map(|t| name_token_text(&t))
    }
}

// ============================================================================
// Enum
// ============================================================================

ast_node!(EnumStatement, ENUM_STATEMENT);
ast_node!(EnumBody, ENUM_BODY);
ast_node!(EnumMember, ENUM_MEMBER);
ast_node!(EnumSpreadMember, ENUM_SPREAD_MEMBER);
ast_node!(EnumMemberValue, ENUM_MEMBER_VALUE);

impl EnumStatement {
    first_child_method!(decorators, DecoratorList);
    first_child_method!(body, EnumBody);

    pub fn name(&self) -> Option<SmolStr> {
        declared_name_token(&self.0).map(|t| name_token_text(&t))
    }
}

impl EnumBody {
    children_method!(members, EnumMember);
    children_method!(spreads, EnumSpreadMember);
}

impl EnumMember {
    first_child_method!(decorators, DecoratorList);
    first_child_method!(value, EnumMemberValue);

    pub fn name(&self) -> Option<SmolStr> {
        member_name_token(&self.0).map(|t| name_token_text(&t))
    }
}

impl EnumSpreadMember {
    first_child_method!(target, ReferenceExpression);
}

impl EnumMemberValue {
    first_child_method!(literal, Literal);
}

// ============================================================================
// Alias
// ============================================================================

ast_node!(AliasStatement, ALIAS_STATEMENT);

impl AliasStatement {
    first_child_method!(template_parameters, TemplateParameters);

    pub fn name(&self) -> Option<SmolStr> {
        declared_name_token(&self.0).map(|t| name_token_text(&t))
    }

    /// The aliased expression after `=`
    pub fn value(&self) -> Option<Expression> {
        self.0.children().find_map(Expression::cast)
    }
}

// ============================================================================
// Operations
// ============================================================================

ast_node!(OperationStatement, OPERATION_STATEMENT);
ast_node!(OperationSignatureDeclaration, OPERATION_SIGNATURE_DECLARATION);
ast_node!(OperationSignatureReference, OPERATION_SIGNATURE_REFERENCE);

impl OperationStatement {
    first_child_method!(decorators, DecoratorList);
    first_child_method!(template_parameters, TemplateParameters);
    first_child_method!(signature, OperationSignature);

    pub fn name(&self) -> Option<SmolStr> {
        declared_name_token(&self.0).map(|t| name_token_text(&t))
    }
}

/// Either a full parameter declaration or an `is` reference
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OperationSignature {
    Declaration(OperationSignatureDeclaration),
    Reference(OperationSignatureReference),
}

impl AstNode for OperationSignature {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::OPERATION_SIGNATURE_DECLARATION
                | SyntaxKind::OPERATION_SIGNATURE_REFERENCE
        )
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::OPERATION_SIGNATURE_DECLARATION => {
                Some(Self::Declaration(OperationSignatureDeclaration(node)))
            }
            SyntaxKind::OPERATION_SIGNATURE_REFERENCE => {
                Some(Self::Reference(OperationSignatureReference(node)))
            }
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Declaration(d) => d.syntax(),
            Self::Reference(r) => r.syntax(),
        }
    }
}

impl OperationSignatureDeclaration {
    /// Parameters in declaration order
    pub fn parameters(&self) -> impl Iterator<Item = ModelMember> + '_ {
        self.0.children().filter_map(ModelMember::cast)
    }

    /// The return type expression after the `:`
    pub fn return_type(&self) -> Option<Expression> {
        self.0.children().find_map(Expression::cast)
    }
}

impl OperationSignatureReference {
    first_child_method!(target, ReferenceExpression);
}

// ============================================================================
// Augment decorators
// ============================================================================

ast_node!(AugmentDecoratorStatement, AUGMENT_DECORATOR_STATEMENT);
ast_node!(EmptyStatement, EMPTY_STATEMENT);

impl AugmentDecoratorStatement {
    first_child_method!(arguments, DecoratorArguments);

    /// The decorated target path, e.g. `Pets.Pet` in `@@doc(Pets.Pet, "...")`
    pub fn path(&self) -> Option<SmolStr> {
        path_text(&self.0)
    }
}

// ============================================================================
// Decorators
// ============================================================================

ast_node!(DecoratorList, DECORATOR_LIST);
ast_node!(Decorator, DECORATOR);
ast_node!(DecoratorArguments, DECORATOR_ARGUMENTS);

impl DecoratorList {
    children_method!(decorators, Decorator);
}

impl Decorator {
    first_child_method!(arguments, DecoratorArguments);

    /// The decorator path after `@`, e.g. `TypeSpec.doc`
    pub fn path(&self) -> Option<SmolStr> {
        path_text(&self.0)
    }
}

impl DecoratorArguments {
    /// Argument expressions in order
    pub fn arguments(&self) -> impl Iterator<Item = Expression> + '_ {
        self.0
            .children()
            .filter(|n| n.kind() == SyntaxKind::EXPRESSION_LIST)
            .flat_map(|list| list.children().filter_map(Expression::cast))
    }
}

// ============================================================================
// Templates
// ============================================================================

ast_node!(TemplateParameters, TEMPLATE_PARAMETERS);
ast_node!(TemplateParameterList, TEMPLATE_PARAMETER_LIST);
ast_node!(TemplateParameter, TEMPLATE_PARAMETER);
ast_node!(TemplateConstraint, TEMPLATE_CONSTRAINT);
ast_node!(TemplateDefault, TEMPLATE_DEFAULT);

impl TemplateParameters {
    /// Parameters in declaration order
    pub fn parameters(&self) -> impl Iterator<Item = TemplateParameter> + '_ {
        self.0
            .children()
            .filter(|n| n.kind() == SyntaxKind::TEMPLATE_PARAMETER_LIST)
            .flat_map(|list| list.children().filter_map(TemplateParameter::cast))
    }
}

impl TemplateParameter {
    first_child_method!(constraint, TemplateConstraint);
    first_child_method!(default, TemplateDefault);

    pub fn name(&self) -> Option<SmolStr> {
        member_name_token(&self.0).map(|t| name_token_text(&t))
    }
}

impl TemplateConstraint {
    first_child_method!(bound, Expression);
}

impl TemplateDefault {
    first_child_method!(value, Expression);
}

/// Dotted-path text of a node: the MEMBER_EXPRESSION child if present,
/// otherwise the first bare name token.
fn path_text(node: &SyntaxNode) -> Option<SmolStr> {
    if let Some(member) = node.children().find_map(MemberExpression::cast) {
        return Some(member.path());
    }
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .filter(|t| !t.kind().is_trivia())
        .skip(1)
        .find(|t| t.kind().is_name())
        .map(|t| name_token_text(&t))
}
