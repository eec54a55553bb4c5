//! Registry of document resources exposed by the gateway.
//!
//! Every resource shares the same CRUD shape; only the URL segment and the
//! backing collection differ.

use std::str::FromStr;

macro_rules! define_resources {
    ($( $(#[$meta:meta])* $variant:ident => $segment:literal, $collection:literal; )*) => {
        /// A document resource mounted under `/api/v1/<segment>`.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Resource {
            $( $(#[$meta])* $variant, )*
        }

        impl Resource {
            /// Every registered resource, in mount order.
            pub const ALL: &'static [Resource] = &[$( Resource::$variant, )*];

            /// URL path segment, e.g. `due-diligence`.
            #[must_use]
            pub const fn path_segment(self) -> &'static str {
                match self {
                    $( Self::$variant => $segment, )*
                }
            }

            /// Backing collection name, e.g. `due_diligence`.
            #[must_use]
            pub const fn collection(self) -> &'static str {
                match self {
                    $( Self::$variant => $collection, )*
                }
            }
        }
    };
}

define_resources! {
    /// Vendor records.
    Vendors => "vendors", "vendors";
    /// Vendor locations.
    Locations => "locations", "locations";
    /// Uploaded document metadata.
    Documents => "documents", "documents";
    /// Vendor due-diligence reviews.
    DueDiligence => "due-diligence", "due_diligence";
    /// Per-state regulatory requirements.
    StateRequirements => "state-requirements", "state_requirements";
    /// PAR records.
    Pars => "pars", "pars";
    /// Application users.
    Users => "users", "users";
    /// Audit change logs.
    Changelogs => "changelogs", "changelogs";
    /// Dashboard tiles.
    MainDashboard => "main-dashboard", "main_dashboard";
    /// PAR due-diligence reviews.
    ParDueDiligence => "par-due-diligence", "par_due_diligence";
    /// PAR employees.
    ParEmployees => "par-employees", "par_employees";
    /// PAR insurance policies.
    ParInsurance => "par-insurance", "par_insurance";
    /// PAR licenses.
    ParLicenses => "par-licenses", "par_licenses";
    /// Regions.
    Regions => "regions", "regions";
    /// States.
    States => "states", "states";
    /// User management entries.
    UserManagement => "user-management", "user_management";
    /// Client-facing vendor views.
    ClientVendors => "client-vendors", "client_vendors";
    /// Client-facing PAR views.
    ClientPars => "client-pars", "client_pars";
    /// Tasks raised for PAR complaints.
    ParComplaintTasks => "par-complaint-tasks", "par_complaint_tasks";
    /// PAR complaints.
    ParComplaints => "par-complaints", "par_complaints";
    /// Documents attached to PAR complaints.
    ParComplaintDocuments => "par-complaint-documents", "par_complaint_documents";
    /// Regions assigned to PAR complaints.
    ParComplaintRegions => "par-complaint-regions", "par_complaint_regions";
    /// Site inspections of vendor locations.
    VendorLocationSiteInspections =>
        "vendor-location-site-inspections", "vendor_location_site_inspections";
    /// Vendor contracts.
    Contracts => "contracts", "contracts";
}

/// Returned when a path segment names no registered resource.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown resource: {segment}")]
pub struct UnknownResource {
    /// The segment that failed to resolve.
    pub segment: String,
}

impl FromStr for Resource {
    type Err = UnknownResource;

    fn from_str(segment: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|resource| resource.path_segment() == segment)
            .ok_or_else(|| UnknownResource {
                segment: segment.to_owned(),
            })
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path_segment())
    }
}
