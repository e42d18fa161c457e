// Fleet Constants
pub const FLEET_SIZE: usize = 25;
pub const TRAIN_ID_PREFIX: &str = "KMRL";
pub const MONITORED_TRAINS: u32 = 8;           // Trains covered by maintenance/energy/twin engines

// Mock Train Ranges
pub const MIN_BAY: u32 = 1;
pub const MAX_BAY: u32 = 8;
pub const MIN_FITNESS: u32 = 5;
pub const MAX_FITNESS: u32 = 24;
pub const MIN_BRANDING_PRIORITY: u8 = 1;
pub const MAX_BRANDING_PRIORITY: u8 = 5;
pub const MIN_MILEAGE: u32 = 40_000;
pub const MAX_MILEAGE: u32 = 59_999;

// Mock Train Probabilities
pub const JOB_CARD_CLOSED_PROBABILITY: f64 = 0.7;
pub const CLEANING_REQUIRED_PROBABILITY: f64 = 0.3;
pub const TELECOM_CLEARANCE_PROBABILITY: f64 = 0.9;
pub const ROLLING_STOCK_CLEARANCE_PROBABILITY: f64 = 0.95;
pub const SIGNALLING_CLEARANCE_PROBABILITY: f64 = 0.95;

// MCDA Weights
pub const FITNESS_WEIGHT: f64 = 0.25;          // Safety first
pub const JOB_CARD_WEIGHT: f64 = 0.20;         // Operational readiness
pub const BRANDING_WEIGHT: f64 = 0.15;         // Revenue contracts
pub const MILEAGE_WEIGHT: f64 = 0.15;          // Asset preservation
pub const CLEANING_WEIGHT: f64 = 0.10;         // Service quality
pub const GEOMETRY_WEIGHT: f64 = 0.15;         // Shunting efficiency
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

// Sub-score Values
pub const MAX_SUB_SCORE: f64 = 20.0;
pub const JOB_CARD_CLOSED_SCORE: f64 = 20.0;
pub const JOB_CARD_OPEN_SCORE: f64 = 0.0;
pub const BRANDING_SCORE_PER_PRIORITY: f64 = 4.0;
pub const TARGET_MILEAGE: f64 = 50_000.0;      // Target annual mileage (km)
pub const MILEAGE_DEVIATION_UNIT: f64 = 1_000.0; // One point lost per 1,000 km off target
pub const CLEANING_REQUIRED_SCORE: f64 = 5.0;
pub const CLEANING_DONE_SCORE: f64 = 15.0;
pub const NEAR_BAY_LIMIT: u32 = 4;             // Bays 1-4 are close to the mainline
pub const NEAR_BAY_SCORE: f64 = 20.0;
pub const FAR_BAY_SCORE: f64 = 10.0;

// Induction Constraints
pub const MIN_SERVICE_TRAINS: usize = 18;      // Service level agreement
pub const MAX_SERVICE_TRAINS: usize = 22;      // Resource limitations
pub const MAX_MAINTENANCE_SLOTS: usize = 6;    // Bay capacity
pub const MAX_CLEANING_SLOTS: usize = 4;       // Manpower limits
pub const SERVICE_SCORE_THRESHOLD: f64 = 12.0;

// Recommendation Thresholds
pub const HIGH_MILEAGE_THRESHOLD: u32 = 55_000;
pub const HIGH_BRANDING_THRESHOLD: u8 = 4;

// Predictive Maintenance
pub const MIN_SENSOR_TEMPERATURE: f64 = 45.0;
pub const SENSOR_TEMPERATURE_SPAN: f64 = 30.0;
pub const MIN_SENSOR_VIBRATION: f64 = 0.5;
pub const SENSOR_VIBRATION_SPAN: f64 = 2.0;
pub const MIN_SENSOR_PRESSURE: f64 = 80.0;
pub const SENSOR_PRESSURE_SPAN: f64 = 40.0;
pub const MAX_WEAR_LEVEL: f64 = 100.0;
pub const NOMINAL_PRESSURE: f64 = 100.0;
pub const TEMPERATURE_FACTOR: f64 = 0.3;
pub const VIBRATION_FACTOR: f64 = 0.3;
pub const PRESSURE_FACTOR: f64 = 0.2;
pub const WEAR_FACTOR: f64 = 0.2;
pub const MAX_FAILURE_PROBABILITY: f64 = 95.0;
pub const ALERT_PROBABILITY_THRESHOLD: f64 = 20.0;
pub const CRITICAL_PROBABILITY: f64 = 75.0;
pub const HIGH_PROBABILITY: f64 = 50.0;
pub const MEDIUM_PROBABILITY: f64 = 25.0;
pub const MAX_COMPONENTS_PER_TRAIN: usize = 3;
pub const PREDICTIVE_SAVINGS_RATE: f64 = 0.6;  // Predictive vs reactive maintenance
pub const BREAKDOWN_PREVENTION_RATE: f64 = 0.85;

// Demand Forecasting
pub const MIN_STATION_BASE_LOAD: f64 = 150.0;
pub const STATION_BASE_LOAD_SPAN: f64 = 300.0;
pub const MORNING_PEAK_MULTIPLIER: f64 = 1.8;
pub const EVENING_PEAK_MULTIPLIER: f64 = 1.9;
pub const MIDDAY_MULTIPLIER: f64 = 1.2;
pub const OFF_PEAK_MULTIPLIER: f64 = 0.6;
pub const WEEKEND_MULTIPLIER: f64 = 0.7;
pub const HOLIDAY_MULTIPLIER: f64 = 0.5;
pub const RAIN_DEMAND_MULTIPLIER: f64 = 1.3;
pub const HEAT_DEMAND_MULTIPLIER: f64 = 1.15;
pub const HEAT_TEMPERATURE_THRESHOLD: f64 = 34.0;
pub const EVENT_DEMAND_MULTIPLIER: f64 = 1.4;
pub const HOLIDAY_PROBABILITY: f64 = 0.1;
pub const PASSENGERS_PER_TRAIN: f64 = 120.0;
pub const MIN_RECOMMENDED_FREQUENCY: u32 = 3;
pub const MAX_RECOMMENDED_FREQUENCY: u32 = 10;
pub const PEAK_FREQUENCY: u32 = 6;             // Trains per hour, 07:00-19:00
pub const OFF_PEAK_FREQUENCY: u32 = 4;

// Energy Optimization
pub const ENERGY_COST_PER_KWH: f64 = 8.5;      // INR
pub const CARBON_PER_KWH: f64 = 0.82;          // kg CO2
pub const MIN_DAILY_CONSUMPTION: f64 = 800.0;  // kWh per train per day
pub const DAILY_CONSUMPTION_SPAN: f64 = 400.0;
pub const MIN_OPTIMIZATION_RATE: f64 = 0.12;
pub const OPTIMIZATION_RATE_SPAN: f64 = 0.08;
pub const MIN_REGENERATIVE_RATE: f64 = 0.2;
pub const REGENERATIVE_RATE_SPAN: f64 = 0.1;
pub const CURRENT_ENERGY_PER_KM: f64 = 2.8;
pub const CURRENT_ENERGY_PER_STOP: f64 = 18.0;
pub const OPTIMAL_ENERGY_PER_KM: f64 = 2.5;
pub const OPTIMAL_ENERGY_PER_STOP: f64 = 15.0;
pub const SPEED_PROFILE_FACTOR: f64 = 0.85;
pub const ECO_MODE_SAVINGS: f64 = 15.0;
pub const BALANCED_MODE_SAVINGS: f64 = 10.0;
pub const DAYS_PER_MONTH: f64 = 30.0;
pub const CO2_PER_TREE_KG: f64 = 21.0;         // Absorbed per tree per year

// Weather
pub const MONSOON_MONTHS: [u32; 4] = [6, 7, 8, 9];
pub const BASE_LINE_SPEED: u32 = 80;           // km/h
pub const MIN_ADAPTED_FREQUENCY: i32 = 2;
pub const STORM_WIND_SPEED: f64 = 60.0;
pub const HIGH_WIND_SPEED: f64 = 40.0;
pub const HEAVY_RAINFALL: f64 = 50.0;
pub const EXTREME_RAINFALL: f64 = 100.0;
pub const MODERATE_RAINFALL: f64 = 20.0;
pub const LOW_VISIBILITY: f64 = 200.0;
pub const CRITICAL_VISIBILITY: f64 = 100.0;

// Digital Twin
pub const MIN_TRAIN_SPEED: f64 = 40.0;
pub const TRAIN_SPEED_SPAN: f64 = 40.0;
pub const ON_TIME_PROBABILITY: f64 = 0.8;
pub const MAX_DELAY_MINUTES: u32 = 4;
pub const DELAYED_THRESHOLD_MINUTES: i32 = 2;
pub const MIN_ONBOARD_PASSENGERS: u32 = 150;
pub const ONBOARD_PASSENGER_SPAN: u32 = 250;
pub const TRAIN_CAPACITY: f64 = 400.0;
pub const MAX_WAITING_PASSENGERS: u32 = 150;
