// src/noyau/requete.rs
//
// Requête (suite ordonnée de jetons) + construction touche par touche
// -------------------------------------------------------------------
// Règles :
// - Chaque opération prend une requête et en RENVOIE une nouvelle (jamais de mutation).
// - Une précondition non remplie => requête rendue telle quelle (no-op silencieux, trace debug).
// - Le nombre d’opérandes ne dépasse jamais max_operands.
// - Un opérande contient au plus un séparateur décimal.

use std::fmt;

use tracing::debug;

use super::eval::ProcesseurRequete;
use super::jetons::{ErreurJeton, Jeton, MOINS, POURCENT};
use super::validation::at_operand_limit;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Requete {
    jetons: Vec<Jeton>,
}

impl Requete {
    pub fn vide() -> Self {
        Self::default()
    }

    pub fn jetons(&self) -> &[Jeton] {
        &self.jetons
    }

    pub fn len(&self) -> usize {
        self.jetons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jetons.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Jeton> {
        self.jetons.get(index)
    }

    pub fn dernier(&self) -> Option<&Jeton> {
        self.jetons.last()
    }

    /// Textes des jetons, dans l’ordre d’affichage.
    pub fn textes(&self) -> Vec<&str> {
        self.jetons.iter().map(Jeton::texte).collect()
    }

    /// Index du dernier opérande (balayage depuis la fin).
    pub fn index_dernier_operande(&self) -> Option<usize> {
        self.jetons.iter().rposition(Jeton::est_operande)
    }

    /// Splice immuable : remplace `nb` jetons à partir de `debut` par `items`.
    fn splice(&self, debut: usize, nb: usize, items: impl IntoIterator<Item = Jeton>) -> Requete {
        let mut jetons = Vec::with_capacity(self.jetons.len() + 2);
        jetons.extend_from_slice(&self.jetons[..debut]);
        jetons.extend(items);
        jetons.extend_from_slice(&self.jetons[(debut + nb).min(self.jetons.len())..]);
        Requete { jetons }
    }

    fn avec(&self, jeton: Jeton) -> Requete {
        self.splice(self.jetons.len(), 0, [jeton])
    }
}

impl FromIterator<Jeton> for Requete {
    fn from_iter<I: IntoIterator<Item = Jeton>>(iter: I) -> Self {
        Requete {
            jetons: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Requete {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, j) in self.jetons.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{j}")?;
        }
        Ok(())
    }
}

/* ------------------------ Construction (touches) ------------------------ */

/// Touche chiffre : uniquement 0-9 (pas d’exposant, pas d’“inf”).
fn est_chiffres(texte: &str) -> bool {
    !texte.is_empty() && texte.bytes().all(|c| c.is_ascii_digit())
}

impl<E> ProcesseurRequete<E> {
    /// Construit une requête depuis des textes bruts (classés selon la configuration).
    pub fn requete_depuis(&self, textes: &[&str]) -> Result<Requete, ErreurJeton> {
        textes
            .iter()
            .map(|t| Jeton::classer(t, &self.config))
            .collect()
    }

    /// Touche C : requête vide.
    pub fn clear(&self) -> Requete {
        Requete::vide()
    }

    /// Touche chiffre : allonge le dernier opérande fini, sinon ouvre un nouvel opérande.
    pub fn add_operand(&self, requete: &Requete, chiffre: &str) -> Requete {
        let point = &self.config.point;

        if let Some(dernier) = requete.dernier() {
            if dernier.est_operande_fini(point) {
                return self.increase_last_operand(requete, chiffre);
            }
        }

        if at_operand_limit(requete, self.config.max_operands) {
            debug!(%requete, chiffre, "opérande refusé : limite atteinte");
            return requete.clone();
        }

        match requete.dernier() {
            None | Some(Jeton::Operateur { .. }) => {
                if !est_chiffres(chiffre) {
                    debug!(chiffre, "opérande refusé : pas un chiffre");
                    return requete.clone();
                }
                requete.avec(Jeton::Operande(chiffre.to_string()))
            }
            // opérande infini : on ne “tape” pas derrière
            Some(Jeton::Operande(_)) => requete.clone(),
        }
    }

    /// Colle `chiffre` au dernier opérande (si le résultat reste un opérande valide).
    pub fn increase_last_operand(&self, requete: &Requete, chiffre: &str) -> Requete {
        let Some(Jeton::Operande(texte)) = requete.dernier() else {
            return requete.clone();
        };

        if !est_chiffres(chiffre) && chiffre != self.config.point {
            debug!(chiffre, "opérande refusé : ni chiffre ni point");
            return requete.clone();
        }

        let nouveau = format!("{texte}{chiffre}");
        if !self.is_operand(&nouveau) || nouveau.matches(self.config.point.as_str()).count() > 1 {
            debug!(%texte, chiffre, "opérande refusé : texte invalide");
            return requete.clone();
        }

        requete.splice(requete.len() - 1, 1, [Jeton::Operande(nouveau)])
    }

    /// Touche point : ajoute le séparateur à l’opérande d’index `index` (une seule fois).
    pub fn add_point(&self, requete: &Requete, index: usize) -> Requete {
        let point = &self.config.point;

        let texte = match requete.get(index) {
            Some(j @ Jeton::Operande(t)) if j.est_operande_fini(point) => t,
            _ => {
                debug!(%requete, index, "point refusé : pas un opérande fini");
                return requete.clone();
            }
        };

        if texte.contains(point.as_str()) {
            return requete.clone();
        }

        let nouveau = format!("{texte}{point}");
        if !self.is_operand(&nouveau) {
            debug!(%texte, "point refusé : texte invalide");
            return requete.clone();
        }

        requete.splice(index, 1, [Jeton::Operande(nouveau)])
    }

    /// Touche opérateur : ajoute après un opérande, remplace un opérateur,
    /// ou s’empile derrière un opérateur unaire à gauche.
    pub fn add_operator(&self, requete: &Requete, operateur: &str) -> Requete {
        if !self.is_operator(operateur) {
            debug!(operateur, "opérateur hors alphabet");
            return requete.clone();
        }

        let limite = at_operand_limit(requete, self.config.max_operands);
        let jeton = Jeton::operateur(operateur, &self.config);

        match requete.dernier() {
            Some(Jeton::Operande(_)) if !limite => requete.avec(jeton),
            Some(
                dernier @ Jeton::Operateur {
                    symbole,
                    unaire_gauche,
                },
            ) => {
                if *unaire_gauche && symbole != operateur && !limite {
                    return requete.avec(jeton);
                }
                debug!(remplace = %dernier, par = operateur, "opérateur remplacé");
                self.replace_last(requete, jeton)
            }
            _ => {
                debug!(%requete, operateur, "opérateur refusé");
                requete.clone()
            }
        }
    }

    /// Remplace le dernier jeton (requête vide => inchangée).
    pub fn replace_last(&self, requete: &Requete, jeton: Jeton) -> Requete {
        if requete.is_empty() {
            return requete.clone();
        }
        requete.splice(requete.len() - 1, 1, [jeton])
    }

    /// Touche ± : bascule le signe du dernier opérande.
    pub fn switch_last_operand_sign(&self, requete: &Requete) -> Requete {
        let Some(index) = requete.index_dernier_operande() else {
            return requete.clone();
        };
        let texte = requete.jetons[index].texte();

        let nouveau = match texte.strip_prefix(MOINS) {
            Some(positif) => positif.to_string(),
            None => format!("{MOINS}{texte}"),
        };
        if !self.is_operand(&nouveau) {
            debug!(texte, "signe refusé : texte invalide");
            return requete.clone();
        }

        requete.splice(index, 1, [Jeton::Operande(nouveau)])
    }

    /// Réécrit chaque `%` :
    /// - suivi d’un opérande  => `* 0.01 *` (pourcentage de l’opérande suivant)
    /// - sinon                => `* 0.01`
    ///
    /// Boucle jusqu’à disparition des `%` (chaque passe en retire un).
    /// Sert uniquement au calcul : la requête affichée n’est pas touchée.
    pub fn normalize_percentages(&self, requete: &Requete) -> Requete {
        let fois = Jeton::Operateur {
            symbole: "*".to_string(),
            unaire_gauche: false,
        };
        let centieme = Jeton::Operande(format!("0{}01", self.config.point));

        let mut courante = requete.clone();
        loop {
            let Some(i) = courante
                .jetons
                .iter()
                .position(|j| j.est_operateur() && j.texte() == POURCENT)
            else {
                break;
            };
            let suivi_operande = courante.get(i + 1).is_some_and(Jeton::est_operande);
            courante = if suivi_operande {
                courante.splice(i, 1, [fois.clone(), centieme.clone(), fois.clone()])
            } else {
                courante.splice(i, 1, [fois.clone(), centieme.clone()])
            };
        }
        courante
    }
}
