quantity!(KilowattHours, "kWh");
