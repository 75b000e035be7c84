// src/main.rs
//
// Calculatrice à touches : point d’entrée console
// -----------------------------------------------
// But:
// - Lire des touches sur stdin (une ligne = plusieurs touches séparées par des espaces)
// - Afficher la requête après chaque ligne, et le résultat quand "=" a été pressé
// - Journal d’historique : abonné en direct, relu à la fin
//
// Touches : 0-9, le point configuré, les opérateurs, +/- (signe), C (effacer), U (annuler), =
//
// Journalisation : RUST_LOG=debug pour voir les touches refusées.

use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use calculatrice_touches::{
    ConfigCalculatrice, JournalHistorique, ProcesseurRequete, Session, Touche,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Calculatrice à touches (console)")]
struct Args {
    /// Fichier de configuration TOML (point, operators, left_unary_operators, ...)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Précision de sortie (remplace digits_after_point du fichier)
    #[arg(long)]
    digits: Option<usize>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let mut config = match &args.config {
        Some(chemin) => ConfigCalculatrice::charger(chemin)?,
        None => ConfigCalculatrice::default(),
    };
    if let Some(d) = args.digits {
        config.digits_after_point = d;
    }
    let processeur = ProcesseurRequete::new(config)?;
    info!(config = ?processeur.config(), "configuration chargée");

    let journal = Arc::new(JournalHistorique::new());

    // Abonné direct : se termine quand le journal est lâché.
    let flux = journal.abonner();
    let abonne = thread::spawn(move || {
        for message in flux {
            eprintln!("[historique] {message}");
        }
    });

    let mut session = Session::new(processeur, Arc::clone(&journal));
    let stdout = io::stdout();

    for ligne in io::stdin().lock().lines() {
        let ligne = ligne?;
        // Some(..) si "=" a été pressé sur cette ligne
        let mut resultat: Option<Option<String>> = None;

        for mot in ligne.split_whitespace() {
            let touche = match Touche::depuis_texte(mot, session.processeur()) {
                Ok(t) => t,
                Err(e) => {
                    eprintln!("Erreur: {e}");
                    continue;
                }
            };
            match session.appuyer(&touche) {
                // "=" sans changement : pas calculable
                Ok(change) if touche == Touche::Egal => {
                    let r = change.then(|| session.dernier_resultat().map(str::to_string));
                    resultat = Some(r.flatten());
                }
                Ok(_) => {}
                Err(e) => eprintln!("Erreur: {e}"),
            }
        }

        let mut out = stdout.lock();
        writeln!(out, "{}", session.requete())?;
        match resultat {
            Some(Some(r)) => writeln!(out, "= {r}")?,
            Some(None) => writeln!(out, "= (pas calculable)")?,
            None => {}
        }
    }

    let entrees = journal.entrees();
    drop(session);
    drop(journal);
    // le thread abonné a fini d’afficher avant le bilan
    if let Err(e) = attendre_abonne(abonne) {
        eprintln!("Erreur: {e}");
    }

    println!("--- historique ({}) ---", entrees.len());
    for e in entrees {
        println!("{e}");
    }
    Ok(())
}

/// Attend le thread abonné ; une panique devient un message d’erreur.
fn attendre_abonne(abonne: thread::JoinHandle<()>) -> Result<(), String> {
    abonne.join().map_err(|panique| {
        let raison = panique
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| panique.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "raison inconnue".to_string());
        format!("thread d’historique interrompu: {raison}")
    })
}
