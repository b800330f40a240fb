// End-to-end checks of the tokenize → check → tree pipeline

use cppsim::{
    analyze, build_tree, check_semantics, check_syntax, tokenize, AnalysisError, SemanticVerdict,
    Stage, SymbolTable, SyntaxVerdict, TokenKind, TreeNode,
};

#[test]
fn test_declaration_pipeline() {
    let tokens = tokenize("int x = 5 ;", SymbolTable::standard());
    let pairs = tokens
        .tokens
        .iter()
        .map(|t| (t.lexeme.as_str(), t.kind))
        .collect::<Vec<_>>();
    assert_eq!(
        pairs,
        [
            ("int", TokenKind::Keyword),
            ("x", TokenKind::Identifier),
            ("=", TokenKind::AssignmentOperator),
            ("5", TokenKind::IntegerLiteral),
            (";", TokenKind::Terminator),
        ]
    );

    assert_eq!(
        check_syntax(tokens.as_slice()).unwrap().to_string(),
        "Valid Syntax"
    );
    assert_eq!(
        check_semantics(tokens.as_slice()).unwrap().to_string(),
        "Semantically Correct: Integer assignment"
    );

    let tree = build_tree(tokens.as_slice()).unwrap();
    let mut leaf = &tree;
    while let [only] = leaf.children.as_slice() {
        leaf = only;
    }
    assert!(leaf.children.is_empty());
    assert_eq!(leaf.label, "Terminator: ;");
}

#[test]
fn test_for_header_with_any_operands() {
    let headers = [
        "for ( i = 0 ; i < 5 ; i ++ )",
        "for ( x = 5 ; x < 0 ; )",
        "for ( idx = start ; idx < end ; idx ++ ) { }",
    ];
    for header in headers {
        let tokens = tokenize(header, SymbolTable::standard());
        assert!(tokens.len() >= 9);
        assert_eq!(check_syntax(tokens.as_slice()), Ok(SyntaxVerdict::ValidForLoop));
        assert_eq!(check_semantics(tokens.as_slice()), Ok(SemanticVerdict::ForLoop));

        let tree = build_tree(tokens.as_slice()).unwrap();
        assert_eq!(tree.children[0].label, "For Loop");
    }
}

#[test]
fn test_unrecognized_leading_token() {
    for source in ["x = 5 ;", "while ( x < 5 )", "return x = 5 ;"] {
        let analysis = analyze(source, SymbolTable::standard());
        assert_eq!(analysis.syntax, Ok(SyntaxVerdict::SyntaxError), "{source}");
        assert_eq!(analysis.semantics, Ok(SemanticVerdict::SemanticError), "{source}");
        assert_eq!(analysis.tree, Ok(TreeNode::new("Program")), "{source}");
    }
}

#[test]
fn test_three_token_unrecognized_statement() {
    let analysis = analyze("return x ;", SymbolTable::standard());
    assert_eq!(analysis.syntax, Ok(SyntaxVerdict::SyntaxError));
    assert_eq!(
        analysis.semantics,
        Err(AnalysisError::InsufficientTokens {
            stage: Stage::Semantic,
            needed: 4,
            found: 3,
        })
    );
    assert_eq!(analysis.tree, Ok(TreeNode::new("Program")));
}

#[test]
fn test_short_sequences_are_errors_not_panics() {
    for source in ["", "int", "int x"] {
        let tokens = tokenize(source, SymbolTable::standard());
        let err = check_syntax(tokens.as_slice()).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::InsufficientTokens {
                stage: Stage::Syntax,
                needed: 3,
                found: tokens.len(),
            }
        );
    }
}

#[test]
fn test_trees_are_equal_but_independent() {
    let tokens = tokenize("for ( i = 0 ; i < 5 ;", SymbolTable::standard());
    let first = build_tree(tokens.as_slice()).unwrap();
    let mut second = build_tree(tokens.as_slice()).unwrap();
    assert_eq!(first, second);

    second.children[0].label.push('!');
    assert_eq!(first.children[0].label, "For Loop");
}

#[test]
fn test_custom_vocabulary_from_json() {
    let symbols = SymbolTable::from_json(
        r#"{ "int": "KEYWORD", "=": "ASSIGNMENT_OPERATOR", ";": "TERMINATOR", "42": "INTEGER_LITERAL" }"#,
    )
    .unwrap();
    let analysis = analyze("int answer = 42;", &symbols);
    assert_eq!(analysis.syntax, Ok(SyntaxVerdict::ValidDeclaration));
    assert_eq!(analysis.semantics, Ok(SemanticVerdict::IntegerAssignment));

    let standard = analyze("int answer = 42;", SymbolTable::standard());
    assert_eq!(standard.semantics, Ok(SemanticVerdict::SemanticError));
}

#[test]
fn test_concurrent_analyses_share_the_standard_table() {
    let handles = (0..4)
        .map(|n| {
            std::thread::spawn(move || {
                let source = if n % 2 == 0 { "int x = 5 ;" } else { "for ( i = 0 ; i < 5 ;" };
                analyze(source, SymbolTable::standard())
            })
        })
        .collect::<Vec<_>>();
    for (n, handle) in handles.into_iter().enumerate() {
        let analysis = handle.join().unwrap();
        let expected = if n % 2 == 0 {
            SyntaxVerdict::ValidDeclaration
        } else {
            SyntaxVerdict::ValidForLoop
        };
        assert_eq!(analysis.syntax, Ok(expected));
    }
}
