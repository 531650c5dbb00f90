/*!
 * Ethernity Types
 * 
 * Modelos do artefato gerado pelo compilador Solidity (AST e ABI)
 */

use crate::error::{Error, Result};
use crate::utils::function_selector;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Artefato compilado de um contrato (`out/<Nome>.sol/<Nome>.json`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractArtifact {
    pub ast: SourceUnit,
    /// Presente apenas no artefato raiz consultado pela ferramenta
    #[serde(default)]
    pub abi: Vec<AbiEntry>,
}

impl ContractArtifact {
    /// Definições de contrato declaradas no arquivo, em ordem de fonte
    pub fn contracts(&self) -> impl Iterator<Item = &ContractDefinition> {
        self.ast.contracts()
    }
}

/// Nó raiz da AST de um arquivo fonte
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceUnit {
    #[serde(default)]
    pub nodes: Vec<SourceUnitNode>,
}

impl SourceUnit {
    pub fn contracts(&self) -> impl Iterator<Item = &ContractDefinition> {
        self.nodes.iter().filter_map(|node| match node {
            SourceUnitNode::ContractDefinition(contract) => Some(contract),
            SourceUnitNode::Other => None,
        })
    }
}

/// Declaração de nível superior
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "nodeType")]
pub enum SourceUnitNode {
    ContractDefinition(ContractDefinition),
    /// Pragmas, imports, funções livres etc.
    #[serde(other)]
    Other,
}

/// Contrato, interface ou biblioteca
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractDefinition {
    pub name: String,
    #[serde(default)]
    pub base_contracts: Vec<InheritanceSpecifier>,
    #[serde(default)]
    pub nodes: Vec<ContractNode>,
}

impl ContractDefinition {
    /// Funções declaradas diretamente, em ordem de declaração
    pub fn functions(&self) -> impl Iterator<Item = &FunctionNode> {
        self.nodes.iter().filter_map(|node| match node {
            ContractNode::FunctionDefinition(function) => Some(function),
            ContractNode::Other => None,
        })
    }

    /// Nomes dos contratos base, na ordem em que foram declarados
    pub fn base_names(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.base_contracts.iter().map(|base| base.base_name.name.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InheritanceSpecifier {
    pub base_name: IdentifierPath,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentifierPath {
    pub name: String,
}

/// Declaração dentro de um contrato
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "nodeType")]
pub enum ContractNode {
    FunctionDefinition(FunctionNode),
    /// Variáveis de estado, eventos, modificadores, structs etc.
    #[serde(other)]
    Other,
}

/// Tipo de função Solidity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FunctionKind {
    Function,
    Constructor,
    Fallback,
    Receive,
    /// `freeFunction` e tipos futuros
    #[serde(other)]
    Unknown,
}

impl FunctionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FunctionKind::Function => "function",
            FunctionKind::Constructor => "constructor",
            FunctionKind::Fallback => "fallback",
            FunctionKind::Receive => "receive",
            FunctionKind::Unknown => "unknown",
        }
    }
}

/// Nó `FunctionDefinition` da AST
///
/// `visibility` e `state_mutability` são mantidos como texto e só são
/// validados na formatação, via [`FunctionNode::visibility`] e
/// [`FunctionNode::state_mutability`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionNode {
    #[serde(default)]
    pub name: String,
    pub kind: FunctionKind,
    pub visibility: String,
    pub state_mutability: String,
    #[serde(default)]
    pub parameters: ParameterList,
    #[serde(default)]
    pub return_parameters: ParameterList,
    #[serde(default)]
    pub modifiers: Vec<ModifierInvocation>,
}

impl FunctionNode {
    pub fn is_constructor(&self) -> bool {
        self.kind == FunctionKind::Constructor
    }

    /// Nome usado como chave e na exibição.
    ///
    /// Funções especiais sem nome (constructor, fallback, receive) usam o
    /// nome do próprio tipo.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() && self.kind != FunctionKind::Function {
            self.kind.as_str()
        } else {
            &self.name
        }
    }

    pub fn visibility(&self) -> Result<Visibility> {
        self.visibility.parse()
    }

    pub fn state_mutability(&self) -> Result<StateMutability> {
        self.state_mutability.parse()
    }
}

/// Lista de parâmetros (`ParameterList`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParameterList {
    #[serde(default)]
    pub parameters: Vec<ParameterRecord>,
}

/// Parâmetro ou retorno (`VariableDeclaration`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterRecord {
    #[serde(default)]
    pub name: Option<String>,
    pub type_descriptions: TypeDescriptions,
}

impl ParameterRecord {
    pub fn type_string(&self) -> &str {
        &self.type_descriptions.type_string
    }

    /// Nome do parâmetro; `None` quando ausente ou vazio
    pub fn declared_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDescriptions {
    pub type_string: String,
}

/// Invocação de modificador em uma função
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifierInvocation {
    pub modifier_name: IdentifierPath,
}

impl ModifierInvocation {
    pub fn name(&self) -> &str {
        &self.modifier_name.name
    }
}

/// Visibilidade declarada de uma função
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Internal,
    Private,
    Public,
    External,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Internal => "internal",
            Visibility::Private => "private",
            Visibility::Public => "public",
            Visibility::External => "external",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Visibility {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "internal" => Ok(Visibility::Internal),
            "private" => Ok(Visibility::Private),
            "public" => Ok(Visibility::Public),
            "external" => Ok(Visibility::External),
            other => Err(Error::UnknownVisibility(other.to_string())),
        }
    }
}

/// Mutabilidade de estado declarada
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateMutability {
    Pure,
    View,
    NonPayable,
    Payable,
}

impl StateMutability {
    pub fn as_str(&self) -> &'static str {
        match self {
            StateMutability::Pure => "pure",
            StateMutability::View => "view",
            StateMutability::NonPayable => "nonpayable",
            StateMutability::Payable => "payable",
        }
    }
}

impl fmt::Display for StateMutability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StateMutability {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pure" => Ok(StateMutability::Pure),
            "view" => Ok(StateMutability::View),
            "nonpayable" => Ok(StateMutability::NonPayable),
            "payable" => Ok(StateMutability::Payable),
            other => Err(Error::UnknownMutability(other.to_string())),
        }
    }
}

/// Entrada da ABI (função, evento, erro, constructor...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbiEntry {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<AbiParam>,
}

impl AbiEntry {
    pub fn is_function(&self) -> bool {
        self.kind == "function"
    }

    /// Assinatura canônica, ex.: `transfer(address,uint256)`
    pub fn signature(&self) -> String {
        let types: Vec<String> = self.inputs.iter().map(AbiParam::canonical_type).collect();
        format!("{}({})", self.name, types.join(","))
    }

    /// Seletor de 4 bytes da assinatura canônica
    pub fn selector(&self) -> [u8; 4] {
        function_selector(&self.signature())
    }
}

/// Parâmetro de entrada da ABI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbiParam {
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<AbiParam>,
}

impl AbiParam {
    /// Tipo canônico; tuplas são expandidas em seus componentes
    pub fn canonical_type(&self) -> String {
        match self.ty.strip_prefix("tuple") {
            Some(suffix) => {
                let inner: Vec<String> =
                    self.components.iter().map(AbiParam::canonical_type).collect();
                format!("({}){}", inner.join(","), suffix)
            }
            None => self.ty.clone(),
        }
    }
}
