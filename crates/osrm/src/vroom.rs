//! Problem files for the VROOM vehicle routing optimizer.
//!
//! See <https://github.com/VROOM-Project/vroom/blob/master/docs/API.md>.

use model::stop::Stop;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Step {
    Start,
    Job { id: u32 },
    End,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: u32,
    /// `[longitude, latitude]`
    pub start: [f64; 2],
    pub end: [f64; 2],
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: u32,
    pub description: String,
    pub location: [f64; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    pub vehicles: Vec<Vehicle>,
    pub jobs: Vec<Job>,
}

impl Problem {
    /// One truck leaving the garage (first stop), serving every other stop in
    /// order and ending at the landfill (last stop). The landfill is the end of
    /// the vehicle, not a job.
    pub fn single_vehicle(stops: &[Stop]) -> Option<Self> {
        let garage = stops.first()?;
        let landfill = stops.last()?;

        let jobs = stops[..stops.len() - 1]
            .iter()
            .zip(1..)
            .map(|(stop, id)| Job {
                id,
                description: stop.label.clone(),
                location: [stop.longitude, stop.latitude],
            })
            .collect::<Vec<_>>();

        let mut steps = vec![Step::Start];
        steps.extend(jobs.iter().map(|job| Step::Job { id: job.id }));
        steps.push(Step::End);

        Some(Self {
            vehicles: vec![Vehicle {
                id: 1,
                start: [garage.longitude, garage.latitude],
                end: [landfill.longitude, landfill.latitude],
                steps,
            }],
            jobs,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn stops() -> Vec<Stop> {
        vec![
            Stop::new(-21.99, -42.91, "Garagem"),
            Stop::new(-21.98, -42.90, "Rua A"),
            Stop::new(-21.97, -42.89, "Aterro"),
        ]
    }

    #[test]
    fn test_single_vehicle_problem() {
        let problem = Problem::single_vehicle(&stops()).unwrap();

        assert_eq!(
            serde_json::to_value(&problem).unwrap(),
            json!({
                "vehicles": [{
                    "id": 1,
                    "start": [-42.91, -21.99],
                    "end": [-42.89, -21.97],
                    "steps": [
                        { "type": "start" },
                        { "type": "job", "id": 1 },
                        { "type": "job", "id": 2 },
                        { "type": "end" }
                    ]
                }],
                "jobs": [
                    { "id": 1, "description": "Garagem", "location": [-42.91, -21.99] },
                    { "id": 2, "description": "Rua A", "location": [-42.90, -21.98] }
                ]
            })
        );
    }

    #[test]
    fn test_single_stop_has_no_jobs() {
        let problem = Problem::single_vehicle(&stops()[..1]).unwrap();

        assert!(problem.jobs.is_empty());
        assert_eq!(problem.vehicles[0].steps, vec![Step::Start, Step::End]);
    }

    #[test]
    fn test_empty_route_has_no_problem() {
        assert_eq!(Problem::single_vehicle(&[]), None);
    }
}
