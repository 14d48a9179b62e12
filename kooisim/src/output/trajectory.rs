//! CSV trajectory export for particle ensembles.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;

use crate::simulation::states::{Ensemble, Environment, Particle};

/// One particle at one output time
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TrajectoryRecord {
    pub id: usize,
    /// Simulation time (seconds)
    pub time_s: f64,
    pub lon: f64,
    pub lat: f64,
    /// Depth (m, positive down)
    pub depth: f64,
    /// Settling velocity after the depth clamp (m/s)
    pub vs: f64,
    /// Settling velocity before the depth clamp (m/s)
    pub vs_init: f64,
    /// Attached algae (cells/m2)
    pub a: f64,
    pub a_coll: f64,
    pub a_growth: f64,
    pub a_resp: f64,
    pub rho_tot: f64,
    pub r_tot: f64,
    pub delta_rho: f64,
    pub temp: f64,
    pub density: f64,
    pub tpp3: f64,
    pub d_phy: f64,
    pub nd_phy: f64,
    pub w_adv: f64,
    pub r_pl: f64,
    pub rho_pl: f64,
}

impl TrajectoryRecord {
    /// Environment columns are NaN before the first sample
    pub fn new(time_s: f64, p: &Particle) -> Self {
        let env = p.env;
        let field = |f: fn(&Environment) -> f64| env.as_ref().map_or(f64::NAN, f);
        Self {
            id: p.id,
            time_s,
            lon: p.lon(),
            lat: p.lat(),
            depth: p.state.z,
            vs: p.state.vs,
            vs_init: p.diag.vs_init,
            a: p.state.a,
            a_coll: p.diag.a_coll,
            a_growth: p.diag.a_growth,
            a_resp: p.diag.a_resp,
            rho_tot: p.diag.rho_tot,
            r_tot: p.diag.r_tot,
            delta_rho: p.diag.delta_rho,
            temp: field(|e| e.temp),
            density: field(|e| e.rho_sw),
            tpp3: field(|e| e.tpp3),
            d_phy: field(|e| e.d_phy),
            nd_phy: field(|e| e.nd_phy),
            w_adv: field(|e| e.w_adv),
            r_pl: p.plastic.r_pl,
            rho_pl: p.plastic.rho_pl,
        }
    }
}

/// Writes every live particle of an ensemble as one CSV row per frame
pub struct TrajectoryWriter<W: Write> {
    writer: csv::Writer<W>,
    rows: usize,
}

impl TrajectoryWriter<File> {
    /// Create the file, and its parent directories if needed
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path: PathBuf = path.as_ref().to_path_buf();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        let file = File::create(&path)?;
        log::info!("trajectory export started: {}", path.display());
        Ok(Self::from_writer(file))
    }
}

impl<W: Write> TrajectoryWriter<W> {
    pub fn from_writer(w: W) -> Self {
        Self { writer: csv::Writer::from_writer(w), rows: 0 }
    }

    /// Append one frame
    pub fn record(&mut self, ens: &Ensemble) -> Result<()> {
        for p in &ens.particles {
            self.writer.serialize(TrajectoryRecord::new(ens.t, p))?;
            self.rows += 1;
        }
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flush and hand back the underlying writer
    pub fn finish(self) -> Result<W> {
        let rows = self.rows;
        let inner = self.writer.into_inner().map_err(|e| anyhow::anyhow!("flushing trajectories: {}", e.error()))?;
        log::info!("trajectory export completed: {} rows", rows);
        Ok(inner)
    }
}
