//! Type identities.

use serde::{Deserialize, Serialize};
use sharp_scanner::SyntaxKind;

/// Identity of a type known to a semantic model.
///
/// Intrinsic types occupy fixed ids below [`TypeId::FIRST_DECLARED`];
/// declared types are numbered from it in declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeId(pub u32);

impl TypeId {
    pub const VOID: TypeId = TypeId(0);
    pub const INT: TypeId = TypeId(1);
    pub const STRING: TypeId = TypeId(2);
    pub const BOOL: TypeId = TypeId(3);
    pub const OBJECT: TypeId = TypeId(4);
    pub const DOUBLE: TypeId = TypeId(5);

    pub const FIRST_DECLARED: u32 = 100;

    #[inline]
    pub fn is_intrinsic(self) -> bool {
        self.0 < Self::FIRST_DECLARED
    }

    /// Intrinsic type named by a predefined type keyword.
    pub fn from_predefined(kind: SyntaxKind) -> Option<TypeId> {
        match kind {
            SyntaxKind::VoidKeyword => Some(TypeId::VOID),
            SyntaxKind::IntKeyword => Some(TypeId::INT),
            SyntaxKind::StringKeyword => Some(TypeId::STRING),
            SyntaxKind::BoolKeyword => Some(TypeId::BOOL),
            SyntaxKind::ObjectKeyword => Some(TypeId::OBJECT),
            SyntaxKind::DoubleKeyword => Some(TypeId::DOUBLE),
            _ => None,
        }
    }

    pub fn intrinsic_name(self) -> Option<&'static str> {
        match self {
            TypeId::VOID => Some("void"),
            TypeId::INT => Some("int"),
            TypeId::STRING => Some("string"),
            TypeId::BOOL => Some("bool"),
            TypeId::OBJECT => Some("object"),
            TypeId::DOUBLE => Some("double"),
            _ => None,
        }
    }
}

/// What kind of type a `TypeId` names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Intrinsic,
    Class,
    Struct,
    Interface,
}
