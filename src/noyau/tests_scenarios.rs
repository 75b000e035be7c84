//! Tests scénarios : propriétés de la construction + calculs de bout en bout.
//!
//! Chaque test part de la configuration par défaut, élargie au besoin
//! (max_operands, precision, % unaire ou non).

use super::config::ConfigCalculatrice;
use super::eval::ProcesseurRequete;
use super::format::format_resultat;
use super::jetons::valeur_operande;
use super::requete::Requete;
use super::validation::{is_computable, operand_count};

fn proc(config: ConfigCalculatrice) -> ProcesseurRequete {
    ProcesseurRequete::new(config).unwrap_or_else(|e| panic!("config invalide: {e}"))
}

fn proc_max(max_operands: usize) -> ProcesseurRequete {
    proc(ConfigCalculatrice {
        max_operands,
        ..Default::default()
    })
}

fn req(p: &ProcesseurRequete, textes: &[&str]) -> Requete {
    p.requete_depuis(textes)
        .unwrap_or_else(|e| panic!("requete {textes:?}: {e}"))
}

fn calc(p: &ProcesseurRequete, textes: &[&str]) -> Option<String> {
    p.calculate(&req(p, textes))
        .unwrap_or_else(|e| panic!("calculate({textes:?}) erreur: {e}"))
}

/* ------------------------ Scénarios ------------------------ */

#[test]
fn scen_deux_plus_deux() {
    let p = proc_max(2);
    assert_eq!(calc(&p, &["2", "+", "2"]).as_deref(), Some("4"));
}

#[test]
fn scen_deux_chiffres_apres_point() {
    let p = proc(ConfigCalculatrice {
        max_operands: 3,
        digits_after_point: 2,
        ..Default::default()
    });
    assert_eq!(calc(&p, &["2", "*", "1", "/", "4"]).as_deref(), Some("0.5"));
}

#[test]
fn scen_arrondi_demi_vers_le_haut() {
    let p = proc(ConfigCalculatrice {
        digits_after_point: 0,
        ..Default::default()
    });
    assert_eq!(calc(&p, &["5", "/", "2"]).as_deref(), Some("3"));
    assert_eq!(calc(&p, &["-5", "/", "2"]).as_deref(), Some("-3"));
    assert_eq!(calc(&p, &["7", "/", "2"]).as_deref(), Some("4"));
}

#[test]
fn scen_accumulation_chiffres() {
    let p = proc_max(2);
    let q = p.add_operand(&p.add_operand(&p.clear(), "1"), "0");
    assert_eq!(q.textes(), ["10"]);
}

#[test]
fn scen_operateur_remplace() {
    let p = proc_max(2);
    let q = p.add_operator(&req(&p, &["5"]), "+");
    assert_eq!(p.add_operator(&q, "-").textes(), ["5", "-"]);
}

#[test]
fn scen_pourcent_seul() {
    // % unaire à gauche (défaut) : 5% = 0.05
    let p = proc_max(2);
    assert_eq!(calc(&p, &["5", "%"]).as_deref(), Some("0.05"));

    // % binaire seulement : un opérande + % => pas calculable
    let mut c = ConfigCalculatrice::default();
    c.left_unary_operators.clear();
    let p = proc(c);
    assert_eq!(calc(&p, &["5", "%"]), None);
}

#[test]
fn scen_unaire_gauche_factorielle() {
    // alphabet avec ! unaire à gauche : laissé tel quel à l’évaluateur
    let p = proc(ConfigCalculatrice::depuis_toml(
        "operators = [\"+\", \"-\", \"*\", \"/\", \"!\"]\nleft_unary_operators = [\"!\"]\n",
    )
    .unwrap_or_else(|e| panic!("toml: {e}")));

    let q = p.add_operator(&p.add_operand(&p.clear(), "5"), "!");
    assert_eq!(q.textes(), ["5", "!"]);
    assert_eq!(p.calculate(&q), Ok(Some("120".to_string())));

    // ! puis + : empilé derrière l’unaire, la requête reste en cours
    let q = p.add_operand(&p.add_operator(&q, "+"), "1");
    assert_eq!(q.textes(), ["5", "!", "+", "1"]);
    assert_eq!(p.calculate(&q), Ok(Some("121".to_string())));
}

#[test]
fn scen_pourcentage_d_un_operande() {
    // 10 % 50 => 10 * 0.01 * 50 = 5
    let p = proc_max(2);
    assert_eq!(calc(&p, &["10", "%", "50"]).as_deref(), Some("5"));
    // 200 + 10 % => 200 + 10 * 0.01
    assert_eq!(calc(&p, &["200", "+", "10", "%"]).as_deref(), Some("200.1"));
}

#[test]
fn scen_signe() {
    let p = proc_max(2);
    let q = p.switch_last_operand_sign(&req(&p, &["3", "+", "4"]));
    assert_eq!(q.textes(), ["3", "+", "-4"]);
    assert_eq!(p.calculate(&q), Ok(Some("-1".to_string())));
}

#[test]
fn scen_division_par_zero() {
    let p = proc_max(2);
    assert_eq!(calc(&p, &["1", "/", "0"]).as_deref(), Some("Infinity"));
    assert_eq!(calc(&p, &["-1", "/", "0"]).as_deref(), Some("-Infinity"));

    // le résultat infini redevient un opérande (mais ne s’allonge pas)
    let q = req(&p, &["Infinity"]);
    assert!(p.is_infinite_operand("Infinity"));
    assert_eq!(p.add_operand(&q, "3"), q);
    assert_eq!(
        p.calculate(&p.add_operand(&p.add_operator(&q, "-"), "1")),
        Ok(Some("Infinity".to_string()))
    );
}

#[test]
fn scen_pas_assez_d_entree() {
    let p = proc_max(2);
    let cas: &[&[&str]] = &[&[], &["5"], &["5", "+"], &["+"]];
    for textes in cas {
        assert_eq!(calc(&p, textes), None, "textes={textes:?}");
    }
}

#[test]
fn scen_saisie_complete() {
    // 12.5 * -2 =, touche par touche
    let p = proc_max(2);
    let mut q = p.clear();
    q = p.add_operand(&q, "1");
    q = p.add_operand(&q, "2");
    q = p.add_point(&q, q.len() - 1);
    q = p.add_operand(&q, "5");
    q = p.add_operator(&q, "+");
    q = p.add_operator(&q, "*");
    q = p.add_operand(&q, "2");
    q = p.switch_last_operand_sign(&q);
    assert_eq!(q.textes(), ["12.5", "*", "-2"]);
    assert_eq!(p.calculate(&q), Ok(Some("-25".to_string())));
    // le calcul ne touche pas la requête
    assert_eq!(q.textes(), ["12.5", "*", "-2"]);
}

/* ------------------------ Propriétés ------------------------ */

#[test]
fn prop_limite_operandes_preservee() {
    for max in 1..=3 {
        let p = proc_max(max);
        let mut q = p.clear();
        for touche in ["1", "+", "2", "-", "3", "*", "4", "%", "5", "/", "6"] {
            q = if p.is_operator(touche) {
                p.add_operator(&q, touche)
            } else {
                p.add_operand(&q, touche)
            };
            q = p.switch_last_operand_sign(&q);
            assert!(operand_count(&q) <= max, "max={max} q={q}");
        }
    }
}

#[test]
fn prop_point_idempotent() {
    let p = proc_max(2);
    let cas: &[&[&str]] = &[&["3"], &["3", "+", "4"], &["-7"], &["0", "-", "2.5"]];
    for textes in cas {
        let q = req(&p, textes);
        for i in 0..q.len() {
            let une = p.add_point(&q, i);
            assert_eq!(p.add_point(&une, i), une, "textes={textes:?} i={i}");
        }
    }
}

#[test]
fn prop_signe_involution() {
    let p = proc_max(3);
    let cas: &[&[&str]] = &[
        &["3"],
        &["-3", "+"],
        &["0"],
        &["3", "+", "4.5"],
        &["Infinity", "*", "-2", "%"],
    ];
    for textes in cas {
        let q = req(&p, textes);
        let deux_fois = p.switch_last_operand_sign(&p.switch_last_operand_sign(&q));
        assert_eq!(deux_fois, q, "textes={textes:?}");
    }
}

#[test]
fn prop_normalisation_sans_pourcent_et_idempotente() {
    let p = proc_max(4);
    let q = req(&p, &["5", "%", "%", "10", "+", "1", "%"]);
    let n = p.normalize_percentages(&q);
    assert!(n.textes().iter().all(|t| *t != "%"));
    assert_eq!(p.normalize_percentages(&n), n);
}

#[test]
fn prop_aller_retour_format() {
    for texte in ["0", "4", "0.5", "-3.25", "1000000", "0.0001"] {
        let v = valeur_operande(texte, ".").unwrap();
        assert_eq!(format_resultat(v, 10, "."), texte);
    }
}

#[test]
fn prop_requete_calculable_jamais_malformee() {
    // Toute requête certifiée calculable, construite touche par touche, passe l’évaluateur.
    let p = proc_max(3);
    let sequences: &[&[&str]] = &[
        &["1", "+", "2"],
        &["1", "%"],
        &["1", "%", "+", "2"],
        &["9", "/", "3", "%", "4"],
        &["2", "-", "-", "5"],
    ];
    for touches in sequences {
        let mut q = p.clear();
        for t in *touches {
            q = if p.is_operator(t) {
                p.add_operator(&q, t)
            } else {
                p.add_operand(&q, t)
            };
        }
        if is_computable(&q) {
            assert!(p.calculate(&q).is_ok(), "q={q}");
        }
    }
}
