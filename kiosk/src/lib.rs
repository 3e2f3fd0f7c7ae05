pub mod cart;
pub mod config;
pub mod machines;
pub mod storage;
pub mod wallet;

use std::error::Error;
use std::path::{Path, PathBuf};
use std::time::Duration;

use gradientfx::{generate_candidates, GradientCandidate, Palette};
use log::{debug, info};
use rand::seq::SliceRandom;
use suds_palette_client::{ExtractionError, PaletteExtractor, SwatchFileExtractor};

use cart::{Cart, CartItem, Receipt};
use machines::{Machine, MachineFilter, Roster};
use storage::{ProfileStore, StoreError};
use wallet::{Wallet, WalletError};

/// How long the pretend QR scanner takes to "find" a machine.
const SCAN_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug, thiserror::Error)]
pub enum KioskError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Wallet(#[from] WalletError),

    #[error("no palette loaded yet, upload a logo first")]
    NoPaletteLoaded,

    #[error("no gradient selected yet")]
    NoGradientSelected,

    #[error("no gradient option at index {index}")]
    NoSuchCandidate { index: usize },

    #[error("no machine with id {id}")]
    NoSuchMachine { id: u32 },

    #[error("{name} is {status}, please select an available machine")]
    MachineUnavailable { name: String, status: String },

    #[error("no machines available right now")]
    NoMachinesAvailable,

    #[error("no cart item at index {index}")]
    NoSuchCartItem { index: usize },
}

/// Per-upload customization state. Regenerated in full when a new palette
/// arrives; the selection is a single overwritable pointer.
#[derive(Default)]
struct CustomizeSession {
    palette: Option<Palette>,
    candidates: Vec<GradientCandidate>,
    selection: Option<usize>,
}

/// One kiosk session: the palette extractor boundary, the profile store,
/// the machine roster and the current customization state.
pub struct Kiosk {
    extractor: Box<dyn PaletteExtractor + Send + Sync>,
    store: ProfileStore,
    roster: Roster,
    session: CustomizeSession,
}

impl Kiosk {
    pub fn builder() -> KioskBuilder {
        KioskBuilder {
            profile_path: None,
            machines_path: None,
            extractor: None,
        }
    }

    /// Awaits the extractor once, then regenerates the candidate set in
    /// full and clears any previous selection. On extraction failure the
    /// session is left as it was and the gradient engine is not invoked.
    pub async fn load_palette<P: AsRef<Path>>(
        &mut self,
        source: P,
    ) -> Result<&[GradientCandidate], KioskError> {
        let source = source.as_ref();
        info!("Extracting palette from {}", source.display());
        let palette = self.extractor.extract(source).await?;
        info!("Extracted {} swatches", palette.len());

        self.session.candidates = generate_candidates(&palette);
        self.session.palette = Some(palette);
        self.session.selection = None;
        Ok(&self.session.candidates)
    }

    pub fn palette(&self) -> Option<&Palette> {
        self.session.palette.as_ref()
    }

    pub fn candidates(&self) -> &[GradientCandidate] {
        &self.session.candidates
    }

    pub fn select_gradient(&mut self, index: usize) -> Result<&GradientCandidate, KioskError> {
        if self.session.palette.is_none() {
            return Err(KioskError::NoPaletteLoaded);
        }
        if index >= self.session.candidates.len() {
            return Err(KioskError::NoSuchCandidate { index });
        }
        self.session.selection = Some(index);
        Ok(&self.session.candidates[index])
    }

    pub fn selected_gradient(&self) -> Option<&GradientCandidate> {
        self.session
            .selection
            .and_then(|index| self.session.candidates.get(index))
    }

    /// Persists the selected candidate under the `customGradient` key.
    pub fn apply_gradient(&mut self) -> Result<(), KioskError> {
        let candidate = self
            .selected_gradient()
            .cloned()
            .ok_or(KioskError::NoGradientSelected)?;
        self.store.set(storage::GRADIENT_KEY, &candidate)?;
        info!("Applied custom background ({:?})", candidate.kind);
        Ok(())
    }

    /// The persisted background, or `None` for the default one.
    pub fn applied_gradient(&self) -> Result<Option<GradientCandidate>, KioskError> {
        Ok(self.store.get(storage::GRADIENT_KEY)?)
    }

    /// Clears the session and removes the persisted background.
    pub fn reset_customization(&mut self) -> Result<(), KioskError> {
        self.session = CustomizeSession::default();
        self.store.remove(storage::GRADIENT_KEY)?;
        info!("Customization reset");
        Ok(())
    }

    pub fn machines(&self, filter: MachineFilter) -> Vec<&Machine> {
        self.roster.filtered(filter)
    }

    /// Marks an available machine as the selected one and persists it.
    pub fn select_machine(&mut self, id: u32) -> Result<&Machine, KioskError> {
        let machine = self
            .roster
            .find(id)
            .ok_or(KioskError::NoSuchMachine { id })?;
        if !machine.status.is_available() {
            return Err(KioskError::MachineUnavailable {
                name: machine.name.clone(),
                status: machine.status.to_string(),
            });
        }
        self.store.set(storage::SELECTED_MACHINE_KEY, machine)?;
        Ok(machine)
    }

    pub fn selected_machine(&self) -> Result<Option<Machine>, KioskError> {
        Ok(self.store.get(storage::SELECTED_MACHINE_KEY)?)
    }

    /// Simulated QR scan: waits for the "camera", then lands on a random
    /// available machine.
    pub async fn scan(&self) -> Result<&Machine, KioskError> {
        debug!("Scanning for a QR code");
        tokio::time::sleep(SCAN_DELAY).await;

        self.roster
            .filtered(MachineFilter::Available)
            .choose(&mut rand::thread_rng())
            .copied()
            .ok_or(KioskError::NoMachinesAvailable)
    }

    pub fn cart(&self) -> Result<Cart, KioskError> {
        Ok(self.store.get(storage::CART_KEY)?.unwrap_or_default())
    }

    pub fn add_to_cart(
        &mut self,
        machine_id: u32,
        addons: Vec<String>,
    ) -> Result<CartItem, KioskError> {
        let machine = self
            .roster
            .find(machine_id)
            .ok_or(KioskError::NoSuchMachine { id: machine_id })?;
        if !machine.status.is_available() {
            return Err(KioskError::MachineUnavailable {
                name: machine.name.clone(),
                status: machine.status.to_string(),
            });
        }

        let item = CartItem::for_machine(machine).with_addons(addons);
        let mut cart = self.cart()?;
        cart.add(item.clone());
        self.store.set(storage::CART_KEY, &cart)?;
        info!("Added {} to cart", item.name);
        Ok(item)
    }

    pub fn remove_from_cart(&mut self, index: usize) -> Result<CartItem, KioskError> {
        let mut cart = self.cart()?;
        let item = cart
            .remove(index)
            .ok_or(KioskError::NoSuchCartItem { index })?;
        self.store.set(storage::CART_KEY, &cart)?;
        Ok(item)
    }

    /// Simulated payment: produces a receipt and clears the persisted cart.
    pub fn checkout(&mut self) -> Result<Receipt, KioskError> {
        let mut cart = self.cart()?;
        let receipt = cart.checkout();
        self.store.remove(storage::CART_KEY)?;
        info!("Payment simulated for ${:.2}, cart cleared", receipt.total);
        Ok(receipt)
    }

    pub fn wallet(&self) -> Result<Wallet, KioskError> {
        Ok(self.store.get(storage::WALLET_KEY)?.unwrap_or_default())
    }

    /// Adds simulated funds and returns the new balance.
    pub fn top_up(&mut self, amount: f64) -> Result<f64, KioskError> {
        let mut wallet = self.wallet()?;
        let balance = wallet.top_up(amount)?;
        self.store.set(storage::WALLET_KEY, &wallet)?;
        info!("Added ${:.2} to wallet, balance is ${:.2}", amount, balance);
        Ok(balance)
    }
}

pub struct KioskBuilder {
    profile_path: Option<PathBuf>,
    machines_path: Option<PathBuf>,
    extractor: Option<Box<dyn PaletteExtractor + Send + Sync>>,
}

impl KioskBuilder {
    pub fn profile_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.profile_path = Some(path.as_ref().to_owned());
        self
    }

    pub fn machines_from_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.machines_path = Some(path.as_ref().to_owned());
        self
    }

    pub fn extractor(mut self, extractor: Box<dyn PaletteExtractor + Send + Sync>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    pub fn build(self) -> Result<Kiosk, Box<dyn Error>> {
        let profile_path = self
            .profile_path
            .unwrap_or_else(|| PathBuf::from("profile.json"));
        let store = ProfileStore::open(&profile_path)?;
        info!("Opened profile store at {}", profile_path.display());

        let roster = match self.machines_path {
            Some(path) => {
                let roster = Roster::from_csv_file(&path)?;
                info!("Loaded {} machines from {}", roster.len(), path.display());
                roster
            }
            None => {
                info!("Using the built-in machine roster");
                Roster::builtin()
            }
        };

        let extractor = self
            .extractor
            .unwrap_or_else(|| Box::new(SwatchFileExtractor::new()));

        Ok(Kiosk {
            extractor,
            store,
            roster,
            session: CustomizeSession::default(),
        })
    }
}
