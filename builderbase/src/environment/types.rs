use builderbase_core_contact_impl::ContactFeatureServiceImpl;
use builderbase_core_health_impl::HealthFeatureServiceImpl;
use builderbase_shared_impl::time::TimeServiceImpl;
use builderbase_templates_impl::TemplateServiceImpl;

// API
pub type RestServer = builderbase_api_rest::RestServer<HealthFeature, ContactFeature>;

// Core
pub type ContactFeature = ContactFeatureServiceImpl<Time>;
pub type HealthFeature = HealthFeatureServiceImpl;

// Shared
pub type Time = TimeServiceImpl;

// Templates
pub type Template = TemplateServiceImpl;
