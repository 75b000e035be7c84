//! Noyau : moteur de requêtes de la calculatrice
//!
//! Organisation interne :
//! - config.rs     : configuration (point, opérateurs, limites, précision)
//! - jetons.rs     : modèle de jetons (opérande / opérateur) + classification
//! - requete.rs    : requête + construction touche par touche (immuable)
//! - validation.rs : limite d’opérandes, calculabilité
//! - expression.rs : évaluateur infixe f64 (shunting-yard)
//! - format.rs     : affichage du résultat
//! - eval.rs       : processeur configuré + calculate

pub mod config;
pub mod eval;
pub mod expression;
pub mod format;
pub mod jetons;
pub mod requete;
pub mod validation;

#[cfg(test)]
mod tests_scenarios;


// API publique minimale
pub use config::{ConfigCalculatrice, ErreurConfig};
pub use eval::ProcesseurRequete;
pub use expression::{ErreurExpression, EvaluateurExpression, EvaluateurFlottant};
pub use format::format_resultat;
pub use jetons::{ErreurJeton, Jeton};
pub use requete::Requete;
