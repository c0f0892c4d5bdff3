extern crate wasm_bindgen;

use wasm_bindgen::prelude::*;

pub mod grammar;
pub use grammar::Grammar;

#[wasm_bindgen]
pub fn expression_ll1_table_to_json() -> String {
    let error_json = |e: String| serde_json::json!({ "error": e }).to_string();
    match grammar::expression::expression_grammar() {
        Ok(g) => {
            let table = g.generate_ll1_parsing_table();
            table
                .to_output(&g)
                .to_json()
                .unwrap_or_else(|e| error_json(e.to_string()))
        }
        Err(e) => error_json(e.to_string()),
    }
}



#[cfg(test)]
mod ll1_table_tests {
    use crate::grammar::{expression::expression_grammar, Grammar, Symbol};

    fn cell(g: &Grammar, table: &crate::grammar::ll1_parsing_table::ParseTable, left: &str, t: &str) -> String {
        let left = match g.get_symbol(left) {
            Some(Symbol::NonTerminal(idx)) => idx,
            _ => panic!("{} is not a nonterminal", left),
        };
        let entry = table.get(left, g.get_symbol(t).unwrap()).unwrap();
        table.entry_to_string(g, left, entry)
    }

    #[test]
    fn expression_table() {
        let g = expression_grammar().unwrap();
        let table = g.generate_ll1_parsing_table();

        assert_eq!(cell(&g, &table, "E", "("), "E → T R");
        assert_eq!(cell(&g, &table, "E", "id"), "E → T R");
        assert_eq!(cell(&g, &table, "R", "+"), "R → + T R");
        assert_eq!(cell(&g, &table, "R", "$"), "R → ε");
        assert_eq!(cell(&g, &table, "R", ")"), "R → ε");
        assert_eq!(cell(&g, &table, "F", "("), "F → ( E )");
        assert_eq!(cell(&g, &table, "F", "id"), "F → id");
        assert_eq!(table.len(), 13);
        assert!(table.get(0, g.get_symbol("+").unwrap()).is_none());
    }

    #[test]
    fn expression_trace() {
        let g = expression_grammar().unwrap();
        let table = g.generate_ll1_parsing_table();

        let expected = [
            "M[E, (] = E → T R",
            "M[E, id] = E → T R",
            "M[R, +] = R → + T R",
            "M[R, )] = R → ε",
            "M[R, $] = R → ε",
            "M[T, (] = T → F Y",
            "M[T, id] = T → F Y",
            "M[Y, +] = Y → ε",
            "M[Y, *] = Y → * F Y",
            "M[Y, )] = Y → ε",
            "M[Y, $] = Y → ε",
            "M[F, (] = F → ( E )",
            "M[F, id] = F → id",
        ]
        .join("\n");
        assert_eq!(table.to_trace(&g), expected);
    }

    #[test]
    fn strict_accepts_ll1_grammar() {
        let g = expression_grammar().unwrap();

        assert_eq!(
            g.generate_ll1_parsing_table_strict().unwrap(),
            g.generate_ll1_parsing_table()
        );
    }

    #[test]
    fn later_production_overwrites() {
        let g = Grammar::new(&[("S", &["a", "a b"])], "S").unwrap();
        let table = g.generate_ll1_parsing_table();

        let entry = table.get(0, g.get_symbol("a").unwrap()).unwrap();
        assert_eq!(entry.production, 1);
        assert!(!entry.vanishing);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn strict_reports_conflict() {
        let g = Grammar::new(&[("S", &["a", "a b"])], "S").unwrap();
        let conflict = g.generate_ll1_parsing_table_strict().unwrap_err();

        assert_eq!(conflict.non_terminal, "S");
        assert_eq!(conflict.lookahead, "a");
        assert_eq!(
            conflict.to_string(),
            "table conflict: nonterminal S, terminal a, competing productions {S → a, S → a b}"
        );
    }

    #[test]
    fn nullable_production_uses_epsilon_marker() {
        let g = Grammar::new(&[("S", &["A"]), ("A", &["a", "ε"])], "S").unwrap();
        let table = g.generate_ll1_parsing_table();
        let a = g.get_symbol("a").unwrap();

        let entry = table.get(0, a).unwrap();
        assert_eq!((entry.production, entry.vanishing), (0, false));
        let entry = table.get(0, Symbol::EndOfInput).unwrap();
        assert_eq!((entry.production, entry.vanishing), (0, true));
        assert_eq!(cell(&g, &table, "S", "$"), "S → ε");
        assert_eq!(cell(&g, &table, "A", "$"), "A → ε");
    }

    #[test]
    fn table_plaintext() {
        let g = expression_grammar().unwrap();
        let table = g.generate_ll1_parsing_table().to_output(&g).to_plaintext();

        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[0].ends_with("$"));
        assert!(lines[5].contains("F -> ( E )"));
        assert!(lines[2].contains("R -> ε"));
    }

    #[test]
    fn table_json() {
        let json = crate::expression_ll1_table_to_json();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(v["terminals"], serde_json::json!(["+", "*", "(", ")", "id", "$"]));
        assert_eq!(v["rows"][4][0], "F");
        assert_eq!(v["rows"][4][1][4]["rights"], serde_json::json!([["id"]]));
        assert_eq!(v["rows"][0][1][0]["rights"], serde_json::json!([]));
    }

    #[test]
    fn table_latex() {
        let g = expression_grammar().unwrap();
        let latex = g.generate_ll1_parsing_table().to_output(&g).to_latex();

        assert!(latex.starts_with("\\[\\begin{array}"));
        assert!(latex.contains("\\text{id}"));
        assert!(latex.contains("R \\rightarrow \\epsilon"));
    }
}

#[cfg(test)]
mod pretty_print_tests {
    use crate::grammar::expression::expression_grammar;

    #[test]
    fn productions_plaintext() {
        let g = expression_grammar().unwrap();

        assert_eq!(
            g.to_production_output_vec().to_plaintext(),
            [
                "E -> T R",
                "R -> + T R",
                "   | ε",
                "T -> F Y",
                "Y -> * F Y",
                "   | ε",
                "F -> ( E )",
                "   | id",
            ]
            .join("\n")
        );
    }

    #[test]
    fn first_follow_plaintext() {
        let g = expression_grammar().unwrap();
        let ff = g.calculate_first_follow();

        assert_eq!(
            g.to_non_terminal_output_vec(&ff).to_plaintext(),
            [
                "E | false | (, id | ), $",
                "R | true | +, ε | ), $",
                "T | false | (, id | ), +, $",
                "Y | true | *, ε | ), +, $",
                "F | false | (, id | ), *, +, $",
            ]
            .join("\n")
        );
    }

    #[test]
    fn first_follow_json() {
        let g = expression_grammar().unwrap();
        let ff = g.calculate_first_follow();
        let json = g.to_non_terminal_output_vec(&ff).to_json().unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(v["data"][1]["name"], "R");
        assert_eq!(v["data"][1]["nullable"], true);
        assert_eq!(v["data"][1]["first"], serde_json::json!(["+", "ε"]));
    }
}
