//! Scalar enumerations carried by nodes (operators, declaration kinds).

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),* $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $text)] $variant, )*
        }

        impl $name {
            /// Returns the source spelling.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $text, )*
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

string_enum! {
    /// Whether a program is a script or an ES module.
    pub enum SourceType {
        /// Classic script.
        Script => "script",
        /// ES module.
        Module => "module",
    }
}

impl Default for SourceType {
    fn default() -> Self {
        Self::Script
    }
}

string_enum! {
    /// Keyword of a variable declaration.
    pub enum VariableKind {
        /// `var`
        Var => "var",
        /// `let`
        Let => "let",
        /// `const`
        Const => "const",
        /// `using`
        Using => "using",
        /// `await using`
        AwaitUsing => "await using",
    }
}

string_enum! {
    /// Kind of a class method.
    pub enum MethodKind {
        /// `constructor() {}`
        Constructor => "constructor",
        /// Plain method.
        Method => "method",
        /// Getter.
        Get => "get",
        /// Setter.
        Set => "set",
    }
}

string_enum! {
    /// Kind of an object literal property.
    pub enum PropertyKind {
        /// `key: value`
        Init => "init",
        /// Getter.
        Get => "get",
        /// Setter.
        Set => "set",
    }
}

string_enum! {
    /// Keyword that introduced a `TSModuleDeclaration`.
    pub enum ModuleKind {
        /// `declare global {}`
        Global => "global",
        /// `module Foo {}`
        Module => "module",
        /// `namespace Foo {}`
        Namespace => "namespace",
    }
}

string_enum! {
    /// Accessibility modifier of a parameter property.
    pub enum Accessibility {
        /// `private`
        Private => "private",
        /// `protected`
        Protected => "protected",
        /// `public`
        Public => "public",
    }
}

string_enum! {
    /// Prefix unary operator.
    pub enum UnaryOperator {
        /// `-`
        Minus => "-",
        /// `+`
        Plus => "+",
        /// `!`
        Not => "!",
        /// `~`
        BitNot => "~",
        /// `typeof`
        Typeof => "typeof",
        /// `void`
        Void => "void",
        /// `delete`
        Delete => "delete",
    }
}

string_enum! {
    /// Increment/decrement operator.
    pub enum UpdateOperator {
        /// `++`
        Increment => "++",
        /// `--`
        Decrement => "--",
    }
}

string_enum! {
    /// Binary (non-logical) operator.
    pub enum BinaryOperator {
        /// `==`
        Eq => "==",
        /// `!=`
        NotEq => "!=",
        /// `===`
        StrictEq => "===",
        /// `!==`
        StrictNotEq => "!==",
        /// `<`
        Lt => "<",
        /// `<=`
        LtEq => "<=",
        /// `>`
        Gt => ">",
        /// `>=`
        GtEq => ">=",
        /// `<<`
        Shl => "<<",
        /// `>>`
        Shr => ">>",
        /// `>>>`
        UShr => ">>>",
        /// `+`
        Add => "+",
        /// `-`
        Sub => "-",
        /// `*`
        Mul => "*",
        /// `/`
        Div => "/",
        /// `%`
        Rem => "%",
        /// `**`
        Exp => "**",
        /// `|`
        BitOr => "|",
        /// `^`
        BitXor => "^",
        /// `&`
        BitAnd => "&",
        /// `in`
        In => "in",
        /// `instanceof`
        Instanceof => "instanceof",
    }
}

string_enum! {
    /// Short-circuiting operator.
    pub enum LogicalOperator {
        /// `&&`
        And => "&&",
        /// `||`
        Or => "||",
        /// `??`
        Coalesce => "??",
    }
}

string_enum! {
    /// Assignment operator.
    pub enum AssignmentOperator {
        /// `=`
        Assign => "=",
        /// `+=`
        AddAssign => "+=",
        /// `-=`
        SubAssign => "-=",
        /// `*=`
        MulAssign => "*=",
        /// `/=`
        DivAssign => "/=",
        /// `%=`
        RemAssign => "%=",
        /// `**=`
        ExpAssign => "**=",
        /// `<<=`
        ShlAssign => "<<=",
        /// `>>=`
        ShrAssign => ">>=",
        /// `>>>=`
        UShrAssign => ">>>=",
        /// `|=`
        BitOrAssign => "|=",
        /// `^=`
        BitXorAssign => "^=",
        /// `&=`
        BitAndAssign => "&=",
        /// `||=`
        OrAssign => "||=",
        /// `&&=`
        AndAssign => "&&=",
        /// `??=`
        CoalesceAssign => "??=",
    }
}
