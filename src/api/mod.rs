pub mod planner_dto;
