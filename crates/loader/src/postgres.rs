use anyhow::Context;
use sqlx::{Connection, PgConnection, Postgres, QueryBuilder, postgres::PgConnectOptions};

use cell_seed_config::DatabaseConfig;
use cell_seed_model::Cell;

use crate::{Connect, Store, schema};

pub struct PgConnector {
    database: DatabaseConfig,
}

impl PgConnector {
    pub fn new(database: DatabaseConfig) -> Self {
        PgConnector { database }
    }

    fn connect_options(&self) -> PgConnectOptions {
        let DatabaseConfig {
            host,
            name,
            user,
            password,
        } = &self.database;
        PgConnectOptions::new()
            .host(host)
            .database(name)
            .username(user)
            .password(password)
    }
}

impl Connect for PgConnector {
    type Store = PgStore;

    fn connect(&self) -> anyhow::Result<PgStore> {
        let runtime = tokio::runtime::Runtime::new().context("cannot start tokio runtime")?;
        let options = self.connect_options();
        let connection = runtime
            .block_on(PgConnection::connect_with(&options))
            .with_context(|| {
                let DatabaseConfig {
                    host, name, user, ..
                } = &self.database;
                format!("cannot connect to database {name} on {host} as {user}")
            })?;
        tracing::debug!(host = %self.database.host, "Connected");
        Ok(PgStore {
            runtime,
            connection,
        })
    }
}

/// A Postgres connection driven by its own runtime, so callers stay
/// synchronous.
pub struct PgStore {
    runtime: tokio::runtime::Runtime,
    connection: PgConnection,
}

impl PgStore {
    const COPY_CHUNK_SIZE: usize = 64 * 1024;
}

impl Store for PgStore {
    fn recreate_table(&mut self) -> anyhow::Result<()> {
        let PgStore {
            runtime,
            connection,
        } = self;
        runtime.block_on(async {
            sqlx::query(schema::DROP_TABLE)
                .execute(&mut *connection)
                .await
                .context("cannot drop cells table")?;
            sqlx::query(schema::CREATE_TABLE)
                .execute(&mut *connection)
                .await
                .context("cannot create cells table")?;
            Ok::<_, anyhow::Error>(())
        })
    }

    fn copy_csv(&mut self, source: &mut dyn std::io::Read) -> anyhow::Result<u64> {
        let PgStore {
            runtime,
            connection,
        } = self;
        runtime.block_on(async {
            let mut copy = connection.copy_in_raw(schema::COPY_CELLS).await?;
            let mut chunk = vec![0; Self::COPY_CHUNK_SIZE];
            loop {
                let read = match source.read(&mut chunk) {
                    Ok(0) => break,
                    Ok(read) => read,
                    Err(err) if err.kind() == std::io::ErrorKind::Interrupted => continue,
                    Err(err) => {
                        copy.abort(err.to_string()).await?;
                        return Err(anyhow::Error::new(err).context("cannot read staged cells"));
                    }
                };
                copy.send(&chunk[..read]).await?;
            }
            let rows = copy.finish().await?;
            Ok::<_, anyhow::Error>(rows)
        })
    }

    fn insert_batch(&mut self, cells: &[Cell]) -> anyhow::Result<u64> {
        if cells.is_empty() {
            return Ok(0);
        }
        let PgStore {
            runtime,
            connection,
        } = self;
        let mut builder = QueryBuilder::<Postgres>::new(schema::INSERT_CELLS);
        builder.push_values(cells, |mut row, cell| {
            row.push_bind(cell.column())
                .push_bind(i64::from(cell.row()))
                .push_bind(cell.value());
        });
        let result = runtime.block_on(builder.build().execute(&mut *connection))?;
        Ok(result.rows_affected())
    }

    fn row_count(&mut self) -> anyhow::Result<u64> {
        let PgStore {
            runtime,
            connection,
        } = self;
        let (count,): (i64,) = runtime
            .block_on(sqlx::query_as(schema::COUNT_CELLS).fetch_one(&mut *connection))?;
        Ok(u64::try_from(count)?)
    }

    fn close(self) -> anyhow::Result<()> {
        let PgStore {
            runtime,
            connection,
        } = self;
        runtime.block_on(connection.close())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_options_follow_config() {
        let connector = PgConnector::new(DatabaseConfig {
            host: "db.internal".to_owned(),
            name: "sheets".to_owned(),
            user: "seeder".to_owned(),
            password: "secret".to_owned(),
        });
        let options = connector.connect_options();
        assert_eq!(options.get_host(), "db.internal");
        assert_eq!(options.get_database(), Some("sheets"));
        assert_eq!(options.get_username(), "seeder");
    }
}
