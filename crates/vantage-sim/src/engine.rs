//! Simulation engine, the core of the picture.
//!
//! `SimulationEngine` owns the hecs ECS world, processes queued commands at
//! tick boundaries, runs all systems, and produces `PictureSnapshot`s. Each
//! tick reads one stable snapshot of external conditions: commands are
//! drained before any system runs, so two route toggles inside one tick
//! interval resolve to the second toggle and nothing in between.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

use vantage_core::commands::PictureCommand;
use vantage_core::components::{
    AirAsset, Convoy, Identity, PathProgress, PlanePosition, TacticalUnit, Telemetry, Vitals,
};
use vantage_core::conditions::ExternalConditions;
use vantage_core::constants::DT;
use vantage_core::enums::{Affiliation, ConvoyStatus, UnitCategory, UnitStatus};
use vantage_core::error::PictureError;
use vantage_core::route::RouteTable;
use vantage_core::state::PictureSnapshot;
use vantage_core::types::{clamp_progress, SimTime};

use crate::systems;

/// Configuration for starting a new picture simulation.
#[derive(Debug, Clone, Copy)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Simulated seconds per tick. A configuration constant, never
    /// measured wall time.
    pub tick_seconds: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tick_seconds: DT,
        }
    }
}

/// The picture engine. Owns the ECS world and all simulation state.
pub struct SimulationEngine {
    world: World,
    routes: RouteTable,
    conditions: ExternalConditions,
    time: SimTime,
    tick_seconds: f64,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PictureCommand>,
    next_id: u32,
}

impl SimulationEngine {
    /// Create an engine over a validated route table.
    pub fn new(routes: RouteTable, config: SimConfig) -> Self {
        let conditions = ExternalConditions::for_table(&routes);
        Self {
            world: World::new(),
            routes,
            conditions,
            time: SimTime::default(),
            tick_seconds: config.tick_seconds,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            next_id: 0,
        }
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PictureCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PictureCommand>) {
        self.command_queue.extend(commands);
    }

    /// Spawn a ground convoy on a route.
    ///
    /// The route index is validated here: pointing a new entity at a
    /// missing route is a setup bug and fails fast. Out-of-range progress
    /// is recoverable and clamped with a warning.
    pub fn spawn_convoy(
        &mut self,
        callsign: &str,
        route: usize,
        progress: f64,
        status: ConvoyStatus,
    ) -> Result<u32, PictureError> {
        let progress = self.admit_progress(callsign, progress);
        let id = self.check_route(callsign, route)?;
        self.world.spawn((
            Identity {
                id,
                callsign: callsign.to_string(),
            },
            Convoy,
            PathProgress { route, progress },
            status,
        ));
        Ok(id)
    }

    /// Spawn an aerial asset on a route. Air assets ignore route health
    /// but still follow the route's curve.
    pub fn spawn_air_asset(
        &mut self,
        callsign: &str,
        route: usize,
        progress: f64,
        status: ConvoyStatus,
    ) -> Result<u32, PictureError> {
        let progress = self.admit_progress(callsign, progress);
        let id = self.check_route(callsign, route)?;
        self.world.spawn((
            Identity {
                id,
                callsign: callsign.to_string(),
            },
            AirAsset,
            PathProgress { route, progress },
            status,
        ));
        Ok(id)
    }

    /// Spawn a free-roaming tactical unit on the normalized plane.
    #[allow(clippy::too_many_arguments)]
    pub fn spawn_unit(
        &mut self,
        callsign: &str,
        category: UnitCategory,
        affiliation: Affiliation,
        x: f64,
        y: f64,
        status: UnitStatus,
        vitals: Vitals,
        telemetry: Telemetry,
    ) -> u32 {
        let id = self.allocate_id();
        self.world.spawn((
            Identity {
                id,
                callsign: callsign.to_string(),
            },
            TacticalUnit {
                category,
                affiliation,
            },
            PlanePosition {
                x: x.clamp(0.0, 100.0),
                y: y.clamp(0.0, 100.0),
            },
            status,
            vitals,
            telemetry,
        ));
        id
    }

    /// Bind an existing tactical unit to a route, replacing its plane
    /// position. Ground-bound units advance along the route while Moving.
    pub fn attach_route(
        &mut self,
        entity: u32,
        route: usize,
        progress: f64,
    ) -> Result<(), PictureError> {
        if self.routes.get(route).is_none() {
            return Err(PictureError::DanglingRouteReference { entity, route });
        }
        let progress = self.admit_progress(&format!("entity {entity}"), progress);

        let Some(target) = self.find_entity(entity) else {
            warn!(entity, "attach_route: no such entity, ignoring");
            return Ok(());
        };
        let _ = self.world.remove_one::<PlanePosition>(target);
        self.world
            .insert_one(target, PathProgress { route, progress })
            .ok();
        Ok(())
    }

    /// Advance the simulation by one tick and return the resulting
    /// snapshot.
    pub fn tick(&mut self) -> PictureSnapshot {
        self.process_commands();

        systems::motion::run(
            &mut self.world,
            &self.routes,
            &self.conditions,
            &mut self.rng,
        );
        systems::status::run(&mut self.world, &self.conditions);
        self.time.advance(self.tick_seconds);

        systems::snapshot::build(&self.world, &self.routes, &self.conditions, &self.time)
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the immutable route table.
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Get the current external-conditions snapshot.
    pub fn conditions(&self) -> &ExternalConditions {
        &self.conditions
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Break an entity's route reference (for testing the dangling-route
    /// guard without a constructible bad state).
    #[cfg(test)]
    pub fn corrupt_route_reference(&mut self, entity: u32, route: usize) {
        if let Some(target) = self.find_entity(entity) {
            if let Ok(mut path) = self.world.get::<&mut PathProgress>(target) {
                path.route = route;
            }
        }
    }

    /// Process all queued commands against the condition state.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: PictureCommand) {
        match command {
            PictureCommand::ToggleRoute { route } => match self.conditions.toggle_route(route) {
                Some(healthy) => debug!(route, healthy, "route toggled"),
                None => warn!(route, "toggle for unknown route ignored"),
            },
            PictureCommand::SetRouteHealth { route, healthy } => {
                if !self.conditions.set_route_health(route, healthy) {
                    warn!(route, "health update for unknown route ignored");
                }
            }
            PictureCommand::Select { entity } => {
                self.conditions.set_selected(Some(entity));
            }
            PictureCommand::ClearSelection => {
                self.conditions.set_selected(None);
            }
            PictureCommand::SetEngagement { entity, engaged } => {
                self.conditions.set_engaged(entity, engaged);
            }
            PictureCommand::ClearDelay { entity } => {
                for (_e, (identity, status)) in
                    self.world.query_mut::<(&Identity, &mut ConvoyStatus)>()
                {
                    if identity.id == entity && *status == ConvoyStatus::Delayed {
                        *status = ConvoyStatus::Normal;
                    }
                }
            }
        }
    }

    fn allocate_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Validate a route index for a new spawn, allocating the entity id on
    /// success so the error can name the entity that would have been
    /// created.
    fn check_route(&mut self, callsign: &str, route: usize) -> Result<u32, PictureError> {
        if self.routes.get(route).is_none() {
            let err = PictureError::DanglingRouteReference {
                entity: self.next_id,
                route,
            };
            warn!(%err, callsign, "spawn rejected");
            return Err(err);
        }
        Ok(self.allocate_id())
    }

    fn admit_progress(&self, label: &str, progress: f64) -> f64 {
        if (0.0..=100.0).contains(&progress) {
            return progress;
        }
        let err = PictureError::InvalidProgress { value: progress };
        warn!(%err, label, "clamping externally supplied progress");
        clamp_progress(progress)
    }

    fn find_entity(&self, id: u32) -> Option<hecs::Entity> {
        self.world
            .query::<&Identity>()
            .iter()
            .find(|(_, identity)| identity.id == id)
            .map(|(entity, _)| entity)
    }
}
