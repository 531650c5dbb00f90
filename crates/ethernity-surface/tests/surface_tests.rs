use std::fs;
use std::path::{Path, PathBuf};

use ethernity_core::utils::artifact_path;
use ethernity_core::{ContractArtifact, Error};
use ethernity_surface::{
    reconcile, run, ContractSurface, MemoryArtifactSource, Palette, Resolution, SurfaceConfig,
};
use serde_json::{json, Value};

fn param(ty: &str, name: &str) -> Value {
    json!({
        "nodeType": "VariableDeclaration",
        "name": name,
        "typeDescriptions": { "typeString": ty }
    })
}

fn function(
    name: &str,
    visibility: &str,
    mutability: &str,
    params: Vec<Value>,
    returns: Vec<Value>,
) -> Value {
    json!({
        "nodeType": "FunctionDefinition",
        "name": name,
        "kind": "function",
        "visibility": visibility,
        "stateMutability": mutability,
        "parameters": { "parameters": params },
        "returnParameters": { "parameters": returns },
        "modifiers": []
    })
}

fn simple(name: &str) -> Value {
    function(name, "external", "nonpayable", vec![], vec![])
}

fn special(kind: &str, visibility: &str, mutability: &str) -> Value {
    json!({
        "nodeType": "FunctionDefinition",
        "name": "",
        "kind": kind,
        "visibility": visibility,
        "stateMutability": mutability,
        "parameters": { "parameters": [] },
        "returnParameters": { "parameters": [] },
        "modifiers": []
    })
}

fn constructor() -> Value {
    special("constructor", "public", "nonpayable")
}

fn abi_function(name: &str) -> Value {
    json!({
        "type": "function",
        "name": name,
        "inputs": [],
        "outputs": [],
        "stateMutability": "nonpayable"
    })
}

fn contract_definition(name: &str, bases: &[&str], nodes: Vec<Value>) -> Value {
    let bases: Vec<Value> = bases
        .iter()
        .map(|b| {
            json!({
                "nodeType": "InheritanceSpecifier",
                "baseName": { "nodeType": "IdentifierPath", "name": b }
            })
        })
        .collect();
    json!({
        "nodeType": "ContractDefinition",
        "name": name,
        "baseContracts": bases,
        "nodes": nodes
    })
}

fn source_unit(contracts: Vec<Value>, abi: Vec<Value>) -> Value {
    let mut nodes = vec![json!({
        "nodeType": "PragmaDirective",
        "literals": ["solidity", "^", "0.8", ".20"]
    })];
    nodes.extend(contracts);
    json!({
        "abi": abi,
        "ast": { "nodeType": "SourceUnit", "nodes": nodes }
    })
}

fn artifact(name: &str, bases: &[&str], nodes: Vec<Value>, abi: Vec<Value>) -> Value {
    source_unit(vec![contract_definition(name, bases, nodes)], abi)
}

fn root(value: Value) -> ContractArtifact {
    serde_json::from_value(value).unwrap()
}

fn lines(root: &ContractArtifact, source: &MemoryArtifactSource) -> Vec<Resolution> {
    let surface = ContractSurface::build(root, source, Palette::plain(), 16).unwrap();
    reconcile(&root.abi, &surface)
}

#[test]
fn test_standalone_contract_in_abi_order() {
    let root = root(artifact(
        "Vault",
        &[],
        vec![
            constructor(),
            function("deposit", "external", "payable", vec![], vec![]),
            function(
                "balanceOf",
                "public",
                "view",
                vec![param("address", "owner")],
                vec![param("uint256", "")],
            ),
        ],
        vec![
            json!({ "type": "constructor", "inputs": [], "stateMutability": "nonpayable" }),
            abi_function("balanceOf"),
            json!({ "type": "event", "name": "Deposited", "inputs": [], "anonymous": false }),
            abi_function("deposit"),
        ],
    ));

    let resolved = lines(&root, &MemoryArtifactSource::new());
    assert_eq!(
        resolved,
        vec![
            Resolution::Own {
                name: "balanceOf".into(),
                line: "public view balanceOf(address owner) returns(uint256)".into(),
            },
            Resolution::Own {
                name: "deposit".into(),
                line: "external payable deposit()".into(),
            },
        ]
    );
}

#[test]
fn test_last_declaration_wins() {
    let root = root(artifact(
        "Registry",
        &[],
        vec![
            function("foo", "external", "nonpayable", vec![], vec![]),
            function("foo", "public", "view", vec![param("uint256", "id")], vec![]),
        ],
        vec![abi_function("foo")],
    ));

    let resolved = lines(&root, &MemoryArtifactSource::new());
    assert_eq!(
        resolved,
        vec![Resolution::Own {
            name: "foo".into(),
            line: "public view foo(uint256 id)".into(),
        }]
    );
}

#[test]
fn test_inherited_function_is_prefixed() {
    let mut source = MemoryArtifactSource::new();
    source
        .insert_json("A", artifact("A", &[], vec![constructor(), simple("foo")], vec![]))
        .unwrap();
    let root = root(artifact("B", &["A"], vec![simple("bar")], vec![abi_function("foo")]));

    let resolved = lines(&root, &source);
    assert_eq!(
        resolved,
        vec![Resolution::Inherited {
            name: "foo".into(),
            contract: "A".into(),
            line: "A external nonpayable foo()".into(),
        }]
    );
}

#[test]
fn test_every_contract_in_source_unit_contributes() {
    let mut source = MemoryArtifactSource::new();
    source
        .insert_json(
            "A",
            source_unit(
                vec![
                    contract_definition("I", &[], vec![simple("fromI")]),
                    contract_definition(
                        "A",
                        &[],
                        vec![
                            special("constructor", "public", "bogus"),
                            special("fallback", "external", "nonpayable"),
                            simple("fromA"),
                        ],
                    ),
                ],
                vec![],
            ),
        )
        .unwrap();
    let root = root(source_unit(
        vec![
            contract_definition("IRoot", &[], vec![simple("fromInterface")]),
            contract_definition("Root", &["A"], vec![simple("fromRoot")]),
        ],
        vec![
            abi_function("fromI"),
            abi_function("fromInterface"),
            abi_function("fromA"),
            abi_function("fromRoot"),
        ],
    ));

    let resolved = lines(&root, &source);
    assert_eq!(
        resolved,
        vec![
            Resolution::Inherited {
                name: "fromI".into(),
                contract: "A".into(),
                line: "A external nonpayable fromI()".into(),
            },
            Resolution::Own {
                name: "fromInterface".into(),
                line: "external nonpayable fromInterface()".into(),
            },
            Resolution::Inherited {
                name: "fromA".into(),
                contract: "A".into(),
                line: "A external nonpayable fromA()".into(),
            },
            Resolution::Own {
                name: "fromRoot".into(),
                line: "external nonpayable fromRoot()".into(),
            },
        ]
    );
}

#[test]
fn test_override_wins_over_base() {
    let mut source = MemoryArtifactSource::new();
    source.insert_json("A", artifact("A", &[], vec![simple("foo")], vec![])).unwrap();
    let root = root(artifact(
        "B",
        &["A"],
        vec![function("foo", "public", "view", vec![], vec![])],
        vec![abi_function("foo")],
    ));

    let resolved = lines(&root, &source);
    assert_eq!(
        resolved,
        vec![Resolution::Own { name: "foo".into(), line: "public view foo()".into() }]
    );
}

#[test]
fn test_diamond_resolution_order() {
    let mut source = MemoryArtifactSource::new();
    source
        .insert_json("A", artifact("A", &[], vec![simple("shared"), simple("base")], vec![]))
        .unwrap();
    let b_shared = function("shared", "public", "view", vec![], vec![]);
    source.insert_json("B", artifact("B", &["A"], vec![b_shared], vec![])).unwrap();
    let c_shared = function("shared", "public", "pure", vec![], vec![]);
    source.insert_json("C", artifact("C", &["A"], vec![c_shared], vec![])).unwrap();
    let root = root(artifact(
        "D",
        &["B", "C"],
        vec![],
        vec![abi_function("shared"), abi_function("base")],
    ));

    let resolved = lines(&root, &source);
    // C is walked first (last declared base), so its declaration is found first
    assert_eq!(
        resolved,
        vec![
            Resolution::Inherited {
                name: "shared".into(),
                contract: "C".into(),
                line: "C public pure shared()".into(),
            },
            Resolution::Inherited {
                name: "base".into(),
                contract: "A".into(),
                line: "A external nonpayable base()".into(),
            },
        ]
    );
}

#[test]
fn test_nearest_ancestor_wins() {
    let mut source = MemoryArtifactSource::new();
    source.insert_json("Root", artifact("Root", &[], vec![simple("owner")], vec![])).unwrap();
    let mid_owner = function("owner", "public", "view", vec![], vec![]);
    source.insert_json("Mid", artifact("Mid", &["Root"], vec![mid_owner], vec![])).unwrap();
    let root = root(artifact("Leaf", &["Mid"], vec![], vec![abi_function("owner")]));

    let resolved = lines(&root, &source);
    assert!(matches!(&resolved[0], Resolution::Inherited { contract, .. } if contract == "Mid"));
}

#[test]
fn test_unresolved_does_not_abort() {
    let root = root(artifact(
        "Token",
        &[],
        vec![simple("mint")],
        vec![abi_function("ghost"), abi_function("mint")],
    ));

    let resolved = lines(&root, &MemoryArtifactSource::new());
    assert_eq!(resolved.len(), 2);
    assert_eq!(resolved[0], Resolution::Unresolved { name: "ghost".into() });
    assert!(resolved[1].is_resolved());
}

#[test]
fn test_unknown_mutability_is_fatal() {
    let root = root(artifact(
        "Legacy",
        &[],
        vec![function("read", "public", "constant", vec![], vec![])],
        vec![abi_function("read")],
    ));

    let source = MemoryArtifactSource::new();
    let err = ContractSurface::build(&root, &source, Palette::plain(), 16).unwrap_err();
    assert!(matches!(err, Error::UnknownMutability(m) if m == "constant"));
}

#[test]
fn test_missing_base_is_fatal() {
    let root = root(artifact("Orphan", &["Missing"], vec![], vec![]));
    let source = MemoryArtifactSource::new();
    let err = ContractSurface::build(&root, &source, Palette::plain(), 16).unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

fn write_artifact(out_dir: &Path, name: &str, value: &Value) -> PathBuf {
    let path = artifact_path(out_dir, name);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, serde_json::to_vec_pretty(value).unwrap()).unwrap();
    path
}

#[test]
fn test_run_from_compiler_output() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("out");

    let ownable_nodes = vec![constructor(), simple("renounceOwnership")];
    let ownable = artifact("Ownable", &[], ownable_nodes, vec![]);
    write_artifact(&out_dir, "Ownable", &ownable);
    let token = write_artifact(
        &out_dir,
        "Token",
        &artifact(
            "Token",
            &["Ownable"],
            vec![function(
                "mint",
                "external",
                "nonpayable",
                vec![param("uint256", "amount")],
                vec![],
            )],
            vec![abi_function("mint"), abi_function("renounceOwnership"), abi_function("burn")],
        ),
    );

    let config = SurfaceConfig { artifacts_dir: out_dir, max_depth: 16, color: false };
    let mut out = Vec::new();
    run(&token, &config, &mut out).unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "external nonpayable mint(uint256 amount)\n\
         Ownable external nonpayable renounceOwnership()\n\
         ERROR unknown function source:\n\
         burn\n"
    );
}

#[test]
fn test_run_with_colors() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("out");
    let pinger = artifact(
        "Pinger",
        &[],
        vec![function("ping", "public", "pure", vec![], vec![])],
        vec![abi_function("ping")],
    );
    let path = write_artifact(&out_dir, "Pinger", &pinger);

    let config = SurfaceConfig { artifacts_dir: out_dir, max_depth: 16, color: true };
    let mut out = Vec::new();
    run(&path, &config, &mut out).unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "\x1b[31mpublic \x1b[32mpure \x1b[36mping\x1b[0m()\x1b[93m\x1b[0m\n"
    );
}

#[test]
fn test_run_missing_root_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = SurfaceConfig {
        artifacts_dir: dir.path().to_path_buf(),
        max_depth: 16,
        color: false,
    };
    let err = run(&dir.path().join("nope.json"), &config, &mut Vec::<u8>::new()).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}
