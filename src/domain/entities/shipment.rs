//! # Shipment Entity
//!
//! The parcel being priced: destination postcode, chargeable weight,
//! optional outer dimensions, piece count, and battery classification.
//!
//! A shipment is destination-scoped but warehouse-agnostic. The same
//! shipment is priced from every configured warehouse so the fees can be
//! compared.
//!
//! # Examples
//!
//! ```
//! use freight_rfq::domain::entities::Shipment;
//! use freight_rfq::domain::value_objects::{Postcode, Weight};
//! use rust_decimal_macros::dec;
//!
//! let shipment = Shipment::builder(Postcode::new("90210"), Weight::from_kg(dec!(2.5))?).build();
//! assert_eq!(shipment.pieces(), 1);
//! assert!(shipment.length().is_none());
//! # Ok::<(), freight_rfq::domain::errors::DomainError>(())
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{
    CargoCategory, Dimension, Postcode, QuoteRequestId, Weight,
};

/// A parcel to be priced across warehouses and channels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shipment {
    id: QuoteRequestId,
    postcode: Postcode,
    weight: Weight,
    length: Option<Dimension>,
    width: Option<Dimension>,
    height: Option<Dimension>,
    pieces: u32,
    cargo: CargoCategory,
}

impl Shipment {
    /// Starts building a shipment from the two mandatory values.
    #[must_use]
    pub fn builder(postcode: Postcode, weight: Weight) -> ShipmentBuilder {
        ShipmentBuilder::new(postcode, weight)
    }

    // ========== Accessors ==========

    /// Returns the quote request identifier.
    #[inline]
    #[must_use]
    pub fn id(&self) -> QuoteRequestId {
        self.id
    }

    /// Returns the destination postcode.
    #[inline]
    #[must_use]
    pub fn postcode(&self) -> &Postcode {
        &self.postcode
    }

    /// Returns the chargeable weight.
    #[inline]
    #[must_use]
    pub fn weight(&self) -> Weight {
        self.weight
    }

    /// Returns the parcel length, if measured.
    #[inline]
    #[must_use]
    pub fn length(&self) -> Option<Dimension> {
        self.length
    }

    /// Returns the parcel width, if measured.
    #[inline]
    #[must_use]
    pub fn width(&self) -> Option<Dimension> {
        self.width
    }

    /// Returns the parcel height, if measured.
    #[inline]
    #[must_use]
    pub fn height(&self) -> Option<Dimension> {
        self.height
    }

    /// Returns the number of pieces in the consignment.
    #[inline]
    #[must_use]
    pub fn pieces(&self) -> u32 {
        self.pieces
    }

    /// Returns the battery classification of the contents.
    #[inline]
    #[must_use]
    pub fn cargo_category(&self) -> CargoCategory {
        self.cargo
    }
}

impl fmt::Display for Shipment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Shipment[{}]: {} to {}",
            self.id, self.weight, self.postcode
        )
    }
}

/// Builder for [`Shipment`].
///
/// The mandatory fields are taken up front; everything else defaults to the
/// vendor's assumptions for an unmeasured single-piece general-cargo parcel.
#[derive(Debug, Clone)]
pub struct ShipmentBuilder {
    postcode: Postcode,
    weight: Weight,
    length: Option<Dimension>,
    width: Option<Dimension>,
    height: Option<Dimension>,
    pieces: u32,
    cargo: CargoCategory,
}

impl ShipmentBuilder {
    /// Creates a builder with the mandatory destination and weight.
    #[must_use]
    pub fn new(postcode: Postcode, weight: Weight) -> Self {
        Self {
            postcode,
            weight,
            length: None,
            width: None,
            height: None,
            pieces: 1,
            cargo: CargoCategory::default(),
        }
    }

    /// Sets all three outer dimensions.
    #[must_use]
    pub fn with_dimensions(
        mut self,
        length: Dimension,
        width: Dimension,
        height: Dimension,
    ) -> Self {
        self.length = Some(length);
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Sets the number of pieces in the consignment.
    #[must_use]
    pub fn with_pieces(mut self, pieces: u32) -> Self {
        self.pieces = pieces;
        self
    }

    /// Sets the battery classification.
    #[must_use]
    pub fn with_cargo_category(mut self, cargo: CargoCategory) -> Self {
        self.cargo = cargo;
        self
    }

    /// Builds the shipment, assigning a fresh quote request identifier.
    #[must_use]
    pub fn build(self) -> Shipment {
        Shipment {
            id: QuoteRequestId::new(),
            postcode: self.postcode,
            weight: self.weight,
            length: self.length,
            width: self.width,
            height: self.height,
            pieces: self.pieces,
            cargo: self.cargo,
        }
    }
}
