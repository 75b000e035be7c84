//! Noyau : processeur de requêtes (instance configurée)
//!
//! calculate : calculabilité -> normalisation des % -> texte "a op b" -> évaluateur -> format
//!
//! Remarque : la requête affichée n’est jamais modifiée par le calcul ;
//! la normalisation travaille sur une copie.

use tracing::{debug, warn};

use super::config::{ConfigCalculatrice, ErreurConfig};
use super::expression::{ErreurExpression, EvaluateurExpression, EvaluateurFlottant};
use super::format::format_resultat;
use super::jetons::{self, Jeton};
use super::requete::Requete;
use super::validation::is_computable;

/// Moteur : configuration (immuable) + évaluateur d’expressions.
///
/// Les opérations de construction (add_operand, add_point, ...) vivent dans requete.rs.
#[derive(Clone, Debug)]
pub struct ProcesseurRequete<E = EvaluateurFlottant> {
    pub(super) config: ConfigCalculatrice,
    pub(super) evaluateur: E,
}

impl ProcesseurRequete<EvaluateurFlottant> {
    /// Processeur avec l’évaluateur flottant intégré (config validée).
    pub fn new(config: ConfigCalculatrice) -> Result<Self, ErreurConfig> {
        Self::avec_evaluateur(config, EvaluateurFlottant)
    }
}

impl<E> ProcesseurRequete<E> {
    pub fn avec_evaluateur(config: ConfigCalculatrice, evaluateur: E) -> Result<Self, ErreurConfig> {
        config.valider()?;
        Ok(Self { config, evaluateur })
    }

    pub fn config(&self) -> &ConfigCalculatrice {
        &self.config
    }

    /* ------------------------ Classification (texte brut) ------------------------ */

    pub fn is_operand(&self, texte: &str) -> bool {
        jetons::is_operand(texte, &self.config.point)
    }

    pub fn is_operator(&self, texte: &str) -> bool {
        self.config.is_operator(texte)
    }

    pub fn is_left_unary_operator(&self, texte: &str) -> bool {
        self.config.is_left_unary_operator(texte)
    }

    pub fn is_infinite_operand(&self, texte: &str) -> bool {
        jetons::is_infinite_operand(texte, &self.config.point)
    }

    /// Texte envoyé à l’évaluateur : jetons séparés par un espace, point décimal ".".
    pub fn texte_evaluation(&self, requete: &Requete) -> String {
        let point = self.config.point.as_str();
        requete
            .jetons()
            .iter()
            .map(|j| match j {
                Jeton::Operande(t) if point != "." => t.replace(point, "."),
                _ => j.texte().to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl<E: EvaluateurExpression> ProcesseurRequete<E> {
    /// Calcule la requête.
    ///
    /// - Ok(None)      : pas calculable (pas assez d’entrée), cas normal et non une erreur
    /// - Ok(Some(s))   : résultat formaté
    /// - Err(e)        : expression refusée par l’évaluateur (remontée telle quelle)
    pub fn calculate(&self, requete: &Requete) -> Result<Option<String>, ErreurExpression> {
        if !is_computable(requete) {
            debug!(%requete, "requête pas calculable");
            return Ok(None);
        }

        let normalisee = self.normalize_percentages(requete);
        let expression = self.texte_evaluation(&normalisee);

        let valeur = self.evaluateur.evaluer(&expression).map_err(|e| {
            warn!(%requete, %expression, erreur = %e, "expression malformée");
            e
        })?;

        let texte = format_resultat(valeur, self.config.digits_after_point, &self.config.point);
        debug!(%requete, %expression, resultat = %texte, "calcul");
        Ok(Some(texte))
    }
}
