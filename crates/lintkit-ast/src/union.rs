//! Named groups of node kinds accepted by child slots.

use crate::schema::NodeKind;
use std::fmt;

/// A named set of node kinds. Membership is closed: a kind belongs to a union
/// only if it is listed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Union {
    /// Anything that may appear in a statement list.
    Statement,
    /// Any expression, including TypeScript expression wrappers.
    Expression,
    /// An expression or a spread element (call arguments, array entries).
    ExpressionOrSpread,
    /// Identifier or destructuring pattern.
    BindingName,
    /// A binding name optionally with a default or rest marker.
    BindingElement,
    /// A function parameter.
    Parameter,
    /// An entry of an array pattern.
    PatternElement,
    /// Left-hand side of an assignment expression.
    AssignmentTarget,
    /// Value of an object property; patterns appear when an object literal is
    /// reinterpreted as a destructuring target.
    PropertyValue,
    /// An entry of an object literal.
    ObjectLiteralElement,
    /// An entry of an object pattern.
    ObjectPatternElement,
    /// A class member.
    ClassElement,
    /// Body of an arrow function.
    ArrowBody,
    /// The wrapped expression of an optional chain.
    ChainElement,
    /// A type.
    TypeNode,
    /// A (possibly qualified) type name.
    EntityName,
    /// Name of a module declaration.
    ModuleName,
    /// A literal accepted inside `TSLiteralType`.
    LiteralTypeValue,
    /// Anything with a parameter list and a body.
    FunctionLike,
}

impl Union {
    /// Every union.
    pub const ALL: &'static [Union] = &[
        Union::Statement,
        Union::Expression,
        Union::ExpressionOrSpread,
        Union::BindingName,
        Union::BindingElement,
        Union::Parameter,
        Union::PatternElement,
        Union::AssignmentTarget,
        Union::PropertyValue,
        Union::ObjectLiteralElement,
        Union::ObjectPatternElement,
        Union::ClassElement,
        Union::ArrowBody,
        Union::ChainElement,
        Union::TypeNode,
        Union::EntityName,
        Union::ModuleName,
        Union::LiteralTypeValue,
        Union::FunctionLike,
    ];

    /// Returns the union's name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Union::Statement => "Statement",
            Union::Expression => "Expression",
            Union::ExpressionOrSpread => "ExpressionOrSpread",
            Union::BindingName => "BindingName",
            Union::BindingElement => "BindingElement",
            Union::Parameter => "Parameter",
            Union::PatternElement => "PatternElement",
            Union::AssignmentTarget => "AssignmentTarget",
            Union::PropertyValue => "PropertyValue",
            Union::ObjectLiteralElement => "ObjectLiteralElement",
            Union::ObjectPatternElement => "ObjectPatternElement",
            Union::ClassElement => "ClassElement",
            Union::ArrowBody => "ArrowBody",
            Union::ChainElement => "ChainElement",
            Union::TypeNode => "TypeNode",
            Union::EntityName => "EntityName",
            Union::ModuleName => "ModuleName",
            Union::LiteralTypeValue => "LiteralTypeValue",
            Union::FunctionLike => "FunctionLike",
        }
    }

    /// Returns true if `kind` belongs to this union.
    #[must_use]
    pub fn contains(self, kind: NodeKind) -> bool {
        kind.unions().contains(&self)
    }

    /// Returns the member kinds in schema order.
    #[must_use]
    pub fn members(self) -> Vec<NodeKind> {
        NodeKind::ALL
            .iter()
            .copied()
            .filter(|kind| self.contains(*kind))
            .collect()
    }
}

impl fmt::Display for Union {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl NodeKind {
    /// Returns every union this kind belongs to, in [`Union::ALL`] order.
    #[must_use]
    pub const fn unions(self) -> &'static [Union] {
        use NodeKind as K;
        use Union as U;
        // No wildcard arm: a new kind must list its unions here.
        match self {
            K::Program
            | K::VariableDeclarator
            | K::ClassBody
            | K::TSModuleBlock
            | K::TemplateElement
            | K::TSTypeAnnotation
            | K::TSTypeParameterInstantiation
            | K::TSTypeParameterDeclaration
            | K::TSTypeParameter => &[],
            K::ExpressionStatement
            | K::EmptyStatement
            | K::IfStatement
            | K::ReturnStatement
            | K::VariableDeclaration
            | K::ClassDeclaration
            | K::ExportNamedDeclaration
            | K::TSModuleDeclaration => &[U::Statement],
            K::BlockStatement => &[U::Statement, U::ArrowBody],
            K::FunctionDeclaration => &[U::Statement, U::FunctionLike],
            K::MethodDefinition | K::PropertyDefinition => &[U::ClassElement],
            K::Identifier => &[
                U::Expression,
                U::ExpressionOrSpread,
                U::BindingName,
                U::BindingElement,
                U::Parameter,
                U::PatternElement,
                U::AssignmentTarget,
                U::PropertyValue,
                U::ArrowBody,
                U::EntityName,
                U::ModuleName,
            ],
            K::Literal => &[
                U::Expression,
                U::ExpressionOrSpread,
                U::AssignmentTarget,
                U::PropertyValue,
                U::ArrowBody,
                U::ModuleName,
                U::LiteralTypeValue,
            ],
            K::ThisExpression => &[
                U::Expression,
                U::ExpressionOrSpread,
                U::AssignmentTarget,
                U::PropertyValue,
                U::ArrowBody,
                U::EntityName,
            ],
            K::Super
            | K::ArrayExpression
            | K::ObjectExpression
            | K::ClassExpression
            | K::TaggedTemplateExpression
            | K::BinaryExpression
            | K::LogicalExpression
            | K::AssignmentExpression
            | K::ConditionalExpression
            | K::NewExpression
            | K::ChainExpression
            | K::SequenceExpression
            | K::ImportExpression
            | K::AwaitExpression
            | K::YieldExpression
            | K::MetaProperty
            | K::TSAsExpression
            | K::TSTypeAssertion
            | K::TSInstantiationExpression => &[
                U::Expression,
                U::ExpressionOrSpread,
                U::AssignmentTarget,
                U::PropertyValue,
                U::ArrowBody,
            ],
            K::Property => &[U::ObjectLiteralElement, U::ObjectPatternElement],
            K::SpreadElement => &[U::ExpressionOrSpread, U::ObjectLiteralElement],
            K::FunctionExpression | K::ArrowFunctionExpression => &[
                U::Expression,
                U::ExpressionOrSpread,
                U::AssignmentTarget,
                U::PropertyValue,
                U::ArrowBody,
                U::FunctionLike,
            ],
            K::TemplateLiteral | K::UnaryExpression | K::UpdateExpression => &[
                U::Expression,
                U::ExpressionOrSpread,
                U::AssignmentTarget,
                U::PropertyValue,
                U::ArrowBody,
                U::LiteralTypeValue,
            ],
            K::CallExpression | K::TSNonNullExpression => &[
                U::Expression,
                U::ExpressionOrSpread,
                U::AssignmentTarget,
                U::PropertyValue,
                U::ArrowBody,
                U::ChainElement,
            ],
            K::MemberExpression => &[
                U::Expression,
                U::ExpressionOrSpread,
                U::PatternElement,
                U::AssignmentTarget,
                U::PropertyValue,
                U::ArrowBody,
                U::ChainElement,
            ],
            K::AssignmentPattern => &[
                U::BindingElement,
                U::Parameter,
                U::PatternElement,
                U::PropertyValue,
            ],
            K::RestElement => &[
                U::BindingElement,
                U::Parameter,
                U::PatternElement,
                U::ObjectPatternElement,
            ],
            K::ArrayPattern | K::ObjectPattern => &[
                U::BindingName,
                U::BindingElement,
                U::Parameter,
                U::PatternElement,
                U::AssignmentTarget,
                U::PropertyValue,
            ],
            K::TSParameterProperty => &[U::Parameter],
            K::TSTypeReference
            | K::TSImportType
            | K::TSUnionType
            | K::TSArrayType
            | K::TSLiteralType
            | K::TSFunctionType
            | K::TSThisType
            | K::TSAnyKeyword
            | K::TSUnknownKeyword
            | K::TSNumberKeyword
            | K::TSStringKeyword
            | K::TSBooleanKeyword
            | K::TSVoidKeyword
            | K::TSUndefinedKeyword
            | K::TSNullKeyword
            | K::TSNeverKeyword
            | K::TSObjectKeyword => &[U::TypeNode],
            K::TSQualifiedName => &[U::EntityName, U::ModuleName],
        }
    }
}
