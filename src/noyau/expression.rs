// src/noyau/expression.rs
//
// Évaluateur d’expressions (flottant)
// -----------------------------------
// Pipeline : texte -> lexèmes -> RPN (shunting-yard) -> valeur f64
//
// Le moteur de requêtes ne dépend que du trait `EvaluateurExpression` ;
// `EvaluateurFlottant` est l’implémentation fournie.
//
// Supporte :
// - nombres (12, 3.5, .5, 1e-3, Infinity)
// - binaires + - * / ^ (^ associatif à droite)
// - moins préfixe (-x, y compris collé à un nombre : "-4")
// - postfixes ! (factorielle entière) et % (divise par 100)
// - parenthèses ( )

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ErreurExpression {
    #[error("expression vide")]
    Vide,

    #[error("caractère inattendu: '{0}'")]
    CaractereInattendu(char),

    #[error("nombre invalide: '{0}'")]
    NombreInvalide(String),

    #[error("opérande manquant pour '{0}'")]
    OperandeManquant(&'static str),

    #[error("parenthèses non fermées")]
    ParenthesesNonFermees,

    #[error("parenthèse fermante inattendue")]
    ParentheseInattendue,

    #[error("expression invalide ({0} valeurs restantes)")]
    ExpressionInvalide(usize),

    #[error("factorielle d’un non-entier ou d’un négatif: {0}")]
    Factorielle(f64),
}

/// Collaborateur : évalue une expression infixe (jetons séparés par des espaces).
pub trait EvaluateurExpression {
    fn evaluer(&self, expression: &str) -> Result<f64, ErreurExpression>;
}

/// Évaluateur infixe f64 (shunting-yard).
#[derive(Clone, Copy, Debug, Default)]
pub struct EvaluateurFlottant;

impl EvaluateurExpression for EvaluateurFlottant {
    fn evaluer(&self, expression: &str) -> Result<f64, ErreurExpression> {
        let lexemes = tokenize(expression)?;
        if lexemes.is_empty() {
            return Err(ErreurExpression::Vide);
        }
        let rpn = to_rpn(&lexemes)?;
        eval_rpn(&rpn)
    }
}

/* ------------------------ Lexèmes ------------------------ */

#[derive(Clone, Copy, Debug, PartialEq)]
enum Lex {
    Num(f64),

    Plus,
    Minus,
    Star,
    Slash,
    Caret,

    Neg,   // moins préfixe (décidé dans to_rpn)
    Bang,  // ! postfixe
    Pct,   // % postfixe

    LPar,
    RPar,
}

impl Lex {
    fn symbole(self) -> &'static str {
        match self {
            Lex::Num(_) => "nombre",
            Lex::Plus => "+",
            Lex::Minus => "-",
            Lex::Star => "*",
            Lex::Slash => "/",
            Lex::Caret => "^",
            Lex::Neg => "-",
            Lex::Bang => "!",
            Lex::Pct => "%",
            Lex::LPar => "(",
            Lex::RPar => ")",
        }
    }
}

fn tokenize(s: &str) -> Result<Vec<Lex>, ErreurExpression> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let simple = match c {
            '+' => Some(Lex::Plus),
            '-' => Some(Lex::Minus),
            '*' => Some(Lex::Star),
            '/' => Some(Lex::Slash),
            '^' => Some(Lex::Caret),
            '!' => Some(Lex::Bang),
            '%' => Some(Lex::Pct),
            '(' => Some(Lex::LPar),
            ')' => Some(Lex::RPar),
            _ => None,
        };
        if let Some(lex) = simple {
            out.push(lex);
            i += 1;
            continue;
        }

        // Mot : seul “Infinity” / “inf” est un nombre
        if c.is_ascii_alphabetic() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_alphabetic() {
                i += 1;
            }
            let mot: String = chars[start..i].iter().collect();
            match mot.to_ascii_lowercase().as_str() {
                "infinity" | "inf" => out.push(Lex::Num(f64::INFINITY)),
                _ => return Err(ErreurExpression::NombreInvalide(mot)),
            }
            continue;
        }

        // Nombre : chiffres, point, exposant optionnel (1e-3)
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
                let mut j = i + 1;
                if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
                    j += 1;
                }
                if j < chars.len() && chars[j].is_ascii_digit() {
                    i = j;
                    while i < chars.len() && chars[i].is_ascii_digit() {
                        i += 1;
                    }
                }
            }
            let texte: String = chars[start..i].iter().collect();
            let v = texte
                .parse::<f64>()
                .map_err(|_| ErreurExpression::NombreInvalide(texte.clone()))?;
            out.push(Lex::Num(v));
            continue;
        }

        return Err(ErreurExpression::CaractereInattendu(c));
    }

    Ok(out)
}

/* ------------------------ Shunting-yard ------------------------ */

fn precedence(t: Lex) -> i32 {
    match t {
        Lex::Plus | Lex::Minus => 1,
        Lex::Star | Lex::Slash => 2,
        Lex::Caret => 3,
        Lex::Neg => 4,
        _ => 0,
    }
}

fn is_right_associative(t: Lex) -> bool {
    matches!(t, Lex::Caret)
}

/// Lexèmes -> RPN.
///
/// - '-' sans valeur avant => Neg (préfixe, sur la pile)
/// - postfixes (! %) => sortie directe (ils lient plus fort que tout)
fn to_rpn(lexemes: &[Lex]) -> Result<Vec<Lex>, ErreurExpression> {
    let mut out: Vec<Lex> = Vec::new();
    let mut ops: Vec<Lex> = Vec::new();

    // “valeur” = un nombre ou une expression fermée
    let mut prev_was_value = false;

    for &lex in lexemes {
        match lex {
            Lex::Num(_) => {
                out.push(lex);
                prev_was_value = true;
            }

            Lex::LPar => {
                ops.push(lex);
                prev_was_value = false;
            }

            Lex::RPar => {
                loop {
                    match ops.pop() {
                        Some(Lex::LPar) => break,
                        Some(top) => out.push(top),
                        None => return Err(ErreurExpression::ParentheseInattendue),
                    }
                }
                prev_was_value = true;
            }

            Lex::Bang | Lex::Pct => {
                if !prev_was_value {
                    return Err(ErreurExpression::OperandeManquant(lex.symbole()));
                }
                out.push(lex);
            }

            Lex::Minus if !prev_was_value => ops.push(Lex::Neg),

            Lex::Plus | Lex::Minus | Lex::Star | Lex::Slash | Lex::Caret => {
                while let Some(&top) = ops.last() {
                    if matches!(top, Lex::LPar) {
                        break;
                    }

                    let doit_pop = if is_right_associative(lex) {
                        precedence(top) > precedence(lex)
                    } else {
                        precedence(top) >= precedence(lex)
                    };
                    if !doit_pop {
                        break;
                    }
                    out.push(top);
                    ops.pop();
                }

                ops.push(lex);
                prev_was_value = false;
            }

            Lex::Neg => ops.push(lex),
        }
    }

    while let Some(op) = ops.pop() {
        if matches!(op, Lex::LPar) {
            return Err(ErreurExpression::ParenthesesNonFermees);
        }
        out.push(op);
    }

    Ok(out)
}

fn eval_rpn(rpn: &[Lex]) -> Result<f64, ErreurExpression> {
    let mut st: Vec<f64> = Vec::new();

    for &lex in rpn {
        let manquant = || ErreurExpression::OperandeManquant(lex.symbole());

        let v = match lex {
            Lex::Num(v) => v,

            Lex::Neg | Lex::Bang | Lex::Pct => {
                let x = st.pop().ok_or_else(manquant)?;
                match lex {
                    Lex::Neg => -x,
                    Lex::Pct => x / 100.0,
                    _ => factorielle(x)?,
                }
            }

            Lex::Plus | Lex::Minus | Lex::Star | Lex::Slash | Lex::Caret => {
                let b = st.pop().ok_or_else(manquant)?;
                let a = st.pop().ok_or_else(manquant)?;
                match lex {
                    Lex::Plus => a + b,
                    Lex::Minus => a - b,
                    Lex::Star => a * b,
                    Lex::Slash => a / b,
                    _ => a.powf(b),
                }
            }

            Lex::LPar | Lex::RPar => return Err(ErreurExpression::ParentheseInattendue),
        };

        st.push(v);
    }

    match st.as_slice() {
        [v] => Ok(*v),
        [] => Err(ErreurExpression::Vide),
        reste => Err(ErreurExpression::ExpressionInvalide(reste.len())),
    }
}

/// n! pour n entier ≥ 0 (au-delà de 170!, f64 déborde => +∞).
fn factorielle(x: f64) -> Result<f64, ErreurExpression> {
    if x < 0.0 || x.fract() != 0.0 {
        return Err(ErreurExpression::Factorielle(x));
    }
    if x > 170.0 {
        return Ok(f64::INFINITY);
    }
    Ok((2..=x as u32).fold(1.0, |acc, k| acc * f64::from(k)))
}
