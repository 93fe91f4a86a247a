mod cli;
mod codegen;
mod config;
mod dialect;
mod error;
mod introspect;
mod naming;
mod provider;
mod rules;
mod schema;
#[cfg(test)]
mod testutil;
mod typemap;
mod warnings;

use std::fs;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, ConnectionConfig};
use crate::config::Configuration;
use crate::error::AbatorError;
use crate::introspect::DatabaseIntrospector;
use crate::provider::mssql::MssqlProvider;
use crate::provider::pg::PgProvider;
use crate::provider::MetadataProvider;
use crate::schema::IntrospectedTable;
use crate::typemap::DefaultTypeResolver;
use crate::warnings::Warnings;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut config = Configuration::load(&cli.config)?;
    config.retain_tables(&cli.table_list());
    let generator = codegen::generator(&cli.generator)?;
    let connection = cli.connection(&config.connection)?;
    let resolver = DefaultTypeResolver::new(config.context.force_big_decimals);
    let mut warnings = Warnings::new();

    tracing::debug!("Connecting to database...");

    let tables = match connection {
        ConnectionConfig::Postgres(url) => {
            let mut provider = PgProvider::connect(&url).await?;
            let tables = introspect_all(&mut provider, &config, &resolver, &mut warnings).await;
            provider.close().await;
            tables?
        }
        ConnectionConfig::Mssql {
            host,
            port,
            database,
            user,
            password,
            trust_cert,
        } => {
            let mut provider =
                MssqlProvider::connect(&host, port, &database, &user, &password, trust_cert).await?;
            introspect_all(&mut provider, &config, &resolver, &mut warnings).await?
        }
    };

    tracing::debug!("Introspected {} tables", tables.len());

    let output = generator.generate(&tables);

    match cli.outfile {
        Some(ref path) => {
            fs::write(path, &output)?;
            tracing::info!("Output written to {path}");
        }
        None => {
            print!("{output}");
        }
    }

    if !warnings.is_empty() {
        tracing::debug!("{} warnings", warnings.len());
        for warning in warnings.iter() {
            eprintln!("WARNING: {warning}");
        }
    }

    Ok(())
}

/// Introspect every configured table in order, on one connection.
async fn introspect_all<P: MetadataProvider>(
    provider: &mut P,
    config: &Configuration,
    resolver: &DefaultTypeResolver,
    warnings: &mut Warnings,
) -> Result<Vec<IntrospectedTable>, AbatorError> {
    let mut introspector = DatabaseIntrospector::new(provider, resolver, warnings);
    let mut tables = Vec::new();

    for tc in &config.tables {
        if !tc.statements.any_enabled() {
            tracing::debug!("Skipping {tc}: every statement is disabled");
            continue;
        }
        tracing::debug!("Introspecting {tc}");
        tables.extend(introspector.introspect_tables(tc).await?);
    }

    Ok(tables)
}
