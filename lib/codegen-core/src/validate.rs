//! Standard-rules validation of every loaded document against the resolved
//! schema. Validation never short-circuits across documents: every outcome
//! is produced so the caller reports the complete error set in one run.

use std::path::PathBuf;

use graphql_tools::validation::rules::default_rules_validation_plan;
use graphql_tools::validation::utils::ValidationError;
use graphql_tools::validation::validate::validate;

use graphql_tools::static_graphql::schema::{Definition, TypeDefinition};

use crate::documents::ParsedOperation;
use crate::schema::ResolvedSchema;
use crate::SchemaDocument;

/// Per-file validation result. An empty error list means the file is valid.
#[derive(Debug)]
pub struct ValidationOutcome {
    pub file_path: PathBuf,
    pub errors: Vec<ValidationError>,
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validates the documents in input order, one outcome per document.
pub fn validate_documents(
    schema: &ResolvedSchema,
    documents: &[ParsedOperation],
) -> Vec<ValidationOutcome> {
    let plan = default_rules_validation_plan();

    documents
        .iter()
        .map(|operation| ValidationOutcome {
            file_path: operation.file_path.clone(),
            errors: validate(&schema.document, &operation.document, &plan)
                .into_iter()
                .map(|error| with_field_hint(&schema.document, error))
                .collect(),
        })
        .collect()
}

/// Appends a `Did you mean` hint to unknown-field errors, built from the
/// sibling fields of the type named in the message. Errors of any other
/// shape pass through untouched.
fn with_field_hint(schema: &SchemaDocument, mut error: ValidationError) -> ValidationError {
    if let Some(hint) = field_hint(schema, &error.message) {
        error.message.push_str(&hint);
    }
    error
}

fn field_hint(schema: &SchemaDocument, message: &str) -> Option<String> {
    let rest = message.strip_prefix("Cannot query field \"")?;
    let (field_name, rest) = rest.split_once("\" on type \"")?;
    let type_name = rest.strip_suffix("\".")?;

    let siblings = field_names_of(schema, type_name)?;
    let suggestions = suggestion_list(field_name, &siblings);
    if suggestions.is_empty() {
        None
    } else {
        Some(did_you_mean(&suggestions))
    }
}

fn field_names_of(schema: &SchemaDocument, type_name: &str) -> Option<Vec<String>> {
    schema.definitions.iter().find_map(|definition| {
        let Definition::TypeDefinition(type_definition) = definition else {
            return None;
        };
        match type_definition {
            TypeDefinition::Object(object) if object.name == type_name => {
                Some(object.fields.iter().map(|f| f.name.clone()).collect())
            }
            TypeDefinition::Interface(interface) if interface.name == type_name => {
                Some(interface.fields.iter().map(|f| f.name.clone()).collect())
            }
            _ => None,
        }
    })
}

/// Candidates within lexical distance of the input, closest first, ties in
/// natural order.
fn suggestion_list(input: &str, options: &[String]) -> Vec<String> {
    let threshold = input.len() * 2 / 5 + 1;
    let mut ranked: Vec<(usize, &String)> = options
        .iter()
        .filter_map(|option| {
            let distance = lexical_distance(input, option);
            (distance <= threshold).then_some((distance, option))
        })
        .collect();
    ranked.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));
    ranked.into_iter().map(|(_, option)| option.clone()).collect()
}

/// Damerau-Levenshtein distance. Differing only in case counts as 1
/// regardless of length.
fn lexical_distance(input: &str, option: &str) -> usize {
    if input == option {
        return 0;
    }
    if input.to_lowercase() == option.to_lowercase() {
        return 1;
    }

    let a: Vec<char> = input.chars().collect();
    let b: Vec<char> = option.chars().collect();
    let mut rows = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for (i, row) in rows.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=b.len() {
        rows[0][j] = j;
    }

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            let mut distance = (rows[i - 1][j] + 1)
                .min(rows[i][j - 1] + 1)
                .min(rows[i - 1][j - 1] + cost);
            if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                distance = distance.min(rows[i - 2][j - 2] + 1);
            }
            rows[i][j] = distance;
        }
    }

    rows[a.len()][b.len()]
}

const MAX_SUGGESTIONS: usize = 5;

fn did_you_mean(suggestions: &[String]) -> String {
    let quoted: Vec<String> = suggestions
        .iter()
        .take(MAX_SUGGESTIONS)
        .map(|name| format!("\"{name}\""))
        .collect();
    let list = match quoted.as_slice() {
        [] => return String::new(),
        [single] => single.clone(),
        [first, second] => format!("{first} or {second}"),
        [rest @ .., last] => format!("{}, or {last}", rest.join(", ")),
    };
    format!(" Did you mean {list}?")
}
