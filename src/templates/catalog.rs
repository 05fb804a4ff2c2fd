//! Concrete template definitions. Scripts are compiled in from
//! `src/templates/scripts/`.

use super::form::{FieldKind, FieldSpec, FormSpec, FormTemplate};
use super::hangman::HangmanTemplate;
use super::TemplateUnit;

pub static ADD: FormSpec = FormSpec {
    title: "Add Two Numbers",
    filename: "add.py",
    script: include_str!("scripts/add.py"),
    fields: &[
        FieldSpec {
            label: "a",
            placeholder: "a",
            initial: "12",
            kind: FieldKind::Number { fallback: 0.0 },
        },
        FieldSpec {
            label: "b",
            placeholder: "b",
            initial: "30",
            kind: FieldKind::Number { fallback: 0.0 },
        },
    ],
    action: "Run",
};

pub static DICE: FormSpec = FormSpec {
    title: "Dice High or Low",
    filename: "dice.py",
    script: include_str!("scripts/dice.py"),
    fields: &[FieldSpec {
        label: "Guess",
        placeholder: "Type 'high' or 'low'",
        initial: "",
        kind: FieldKind::Text,
    }],
    action: "Roll",
};

pub static GREET: FormSpec = FormSpec {
    title: "Greeter",
    filename: "greet.py",
    script: include_str!("scripts/greet.py"),
    fields: &[FieldSpec {
        label: "Name",
        placeholder: "Enter a name",
        initial: "Ada Lovelace",
        kind: FieldKind::Text,
    }],
    action: "Run",
};

pub static STATS: FormSpec = FormSpec {
    title: "Descriptive Stats",
    filename: "stats.py",
    script: include_str!("scripts/stats.py"),
    fields: &[FieldSpec {
        label: "Numbers",
        placeholder: "Comma-separated numbers",
        initial: "4, 8, 15, 16, 23, 42",
        kind: FieldKind::Text,
    }],
    action: "Run",
};

pub static FIBONACCI: FormSpec = FormSpec {
    title: "Fibonacci Sequence",
    filename: "fibonacci.py",
    script: include_str!("scripts/fibonacci.py"),
    fields: &[FieldSpec {
        label: "Terms",
        placeholder: "Number of terms",
        initial: "12",
        kind: FieldKind::Integer { fallback: 10 },
    }],
    action: "Run",
};

pub static PALINDROME: FormSpec = FormSpec {
    title: "Palindrome Checker",
    filename: "palindrome.py",
    script: include_str!("scripts/palindrome.py"),
    fields: &[FieldSpec {
        label: "Text",
        placeholder: "Enter text",
        initial: "A man a plan a canal Panama",
        kind: FieldKind::Text,
    }],
    action: "Run",
};

/// Form spec for a registry identifier; hangman is not a form.
pub fn form_spec(id: &str) -> Option<&'static FormSpec> {
    match id {
        "add" => Some(&ADD),
        "dice" => Some(&DICE),
        "greet" => Some(&GREET),
        "stats" => Some(&STATS),
        "fibonacci" => Some(&FIBONACCI),
        "palindrome" => Some(&PALINDROME),
        _ => None,
    }
}

pub fn build_hangman() -> Box<dyn TemplateUnit> {
    Box::new(HangmanTemplate::new())
}

pub fn build_add() -> Box<dyn TemplateUnit> {
    Box::new(FormTemplate::new(&ADD))
}

pub fn build_dice() -> Box<dyn TemplateUnit> {
    Box::new(FormTemplate::new(&DICE))
}

pub fn build_greet() -> Box<dyn TemplateUnit> {
    Box::new(FormTemplate::new(&GREET))
}

pub fn build_stats() -> Box<dyn TemplateUnit> {
    Box::new(FormTemplate::new(&STATS))
}

pub fn build_fibonacci() -> Box<dyn TemplateUnit> {
    Box::new(FormTemplate::new(&FIBONACCI))
}

pub fn build_palindrome() -> Box<dyn TemplateUnit> {
    Box::new(FormTemplate::new(&PALINDROME))
}
